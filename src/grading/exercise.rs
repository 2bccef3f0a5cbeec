use std::collections::{BTreeMap, BTreeSet};

use crate::models::{FillInBlanks, MatchPairs, MultipleChoice, SingleChoice};

use super::{Gradable, Mark};

impl Gradable for SingleChoice {
    /// Id of the chosen option.
    type Submission = Option<String>;

    fn empty_submission(&self) -> Self::Submission {
        None
    }

    fn is_complete(&self, chosen: &Self::Submission) -> bool {
        chosen.is_some()
    }

    fn evaluate(&self, chosen: &Self::Submission) -> bool {
        chosen.as_deref() == Some(self.correct_answer.as_str())
    }

    fn marks(&self, chosen: &Self::Submission) -> Vec<Mark> {
        self.options
            .iter()
            .map(|option| {
                Mark::for_option(
                    chosen.as_deref() == Some(option.id.as_str()),
                    option.id == self.correct_answer,
                )
            })
            .collect()
    }
}

impl Gradable for MultipleChoice {
    /// Ids of the chosen options.
    type Submission = BTreeSet<String>;

    fn empty_submission(&self) -> Self::Submission {
        BTreeSet::new()
    }

    fn is_complete(&self, chosen: &Self::Submission) -> bool {
        !chosen.is_empty()
    }

    fn evaluate(&self, chosen: &Self::Submission) -> bool {
        *chosen == self.correct_answers
    }

    fn marks(&self, chosen: &Self::Submission) -> Vec<Mark> {
        self.options
            .iter()
            .map(|option| {
                Mark::for_option(
                    chosen.contains(&option.id),
                    self.correct_answers.contains(&option.id),
                )
            })
            .collect()
    }
}

impl Gradable for FillInBlanks {
    /// Chosen value per blank id.
    type Submission = BTreeMap<String, String>;

    fn empty_submission(&self) -> Self::Submission {
        BTreeMap::new()
    }

    fn is_complete(&self, filled: &Self::Submission) -> bool {
        self.blanks
            .iter()
            .all(|blank| filled.get(&blank.id).is_some_and(|value| !value.is_empty()))
    }

    fn evaluate(&self, filled: &Self::Submission) -> bool {
        self.blanks
            .iter()
            .all(|blank| filled.get(&blank.id) == self.correct_answers.get(&blank.id))
    }

    /// One mark per blank, in content order.
    fn marks(&self, filled: &Self::Submission) -> Vec<Mark> {
        self.ordered_blanks()
            .into_iter()
            .map(|blank| Mark::for_slot(filled.get(&blank.id) == self.correct_answers.get(&blank.id)))
            .collect()
    }
}

impl Gradable for MatchPairs {
    /// Chosen right value per left item.
    type Submission = BTreeMap<String, String>;

    fn empty_submission(&self) -> Self::Submission {
        BTreeMap::new()
    }

    fn is_complete(&self, matches: &Self::Submission) -> bool {
        self.left_items()
            .all(|left| matches.get(left).is_some_and(|right| !right.is_empty()))
    }

    fn evaluate(&self, matches: &Self::Submission) -> bool {
        self.pairs
            .iter()
            .all(|pair| matches.get(&pair.left) == Some(&pair.right))
    }

    /// One mark per pair, in authored order.
    fn marks(&self, matches: &Self::Submission) -> Vec<Mark> {
        self.pairs
            .iter()
            .map(|pair| Mark::for_slot(matches.get(&pair.left) == Some(&pair.right)))
            .collect()
    }
}
