//! Exercise definitions for the presentation widgets.
//!
//! Unlike an authored [`Question`](super::Question), these carry a title,
//! rich content and option identifiers, and include the fill-in-the-blank
//! and match-pairs formats.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A selectable option with a stable identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ChoiceOption {
    pub fn text(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: Some(text.into()),
            image: None,
        }
    }

    /// What to show for this option: its text, else its image source.
    pub fn label(&self) -> &str {
        self.text
            .as_deref()
            .or(self.image.as_deref())
            .unwrap_or("Option")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleChoice {
    pub title: String,
    pub content: String,
    pub options: Vec<ChoiceOption>,
    /// Id of the correct option.
    pub correct_answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipleChoice {
    pub title: String,
    pub content: String,
    pub options: Vec<ChoiceOption>,
    /// Ids of every correct option.
    pub correct_answers: BTreeSet<String>,
}

/// A gap in the content of a [`FillInBlanks`] exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blank {
    pub id: String,
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillInBlanks {
    pub title: String,
    pub content: String,
    pub blanks: Vec<Blank>,
    /// Values offered for every blank.
    pub options: Vec<String>,
    /// Correct value per blank id.
    pub correct_answers: BTreeMap<String, String>,
}

impl FillInBlanks {
    /// Blanks in content order.
    pub fn ordered_blanks(&self) -> Vec<&Blank> {
        let mut blanks: Vec<&Blank> = self.blanks.iter().collect();
        blanks.sort_by_key(|blank| blank.position);
        blanks
    }
}

/// One authored left/right association.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    pub left: String,
    pub right: String,
}

impl Pair {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPairs {
    pub title: String,
    pub content: String,
    pub pairs: Vec<Pair>,
}

impl MatchPairs {
    /// Left column, in authored order.
    pub fn left_items(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|pair| pair.left.as_str())
    }

    /// The authored right value for a left item.
    pub fn right_for(&self, left: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|pair| pair.left == left)
            .map(|pair| pair.right.as_str())
    }
}

/// Any exercise format, tagged by `type` in JSON:
/// `single`, `multiple`, `fillInBlanks` or `matchPairs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Exercise {
    Single(SingleChoice),
    Multiple(MultipleChoice),
    FillInBlanks(FillInBlanks),
    MatchPairs(MatchPairs),
}

/// Data-integrity defects in an exercise definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExerciseError {
    #[error("an exercise has an empty title")]
    EmptyTitle,
    #[error("{title}: correct answer {id} is not one of the options")]
    UnknownOption { title: String, id: String },
    #[error("{0}: no option is marked correct")]
    NoCorrectOption(String),
    #[error("{title}: blank {blank} has no correct answer among the offered values")]
    UnanswerableBlank { title: String, blank: String },
    #[error("{0}: there is nothing to match")]
    NoPairs(String),
    #[error("{title}: left item {left} appears more than once")]
    DuplicateLeft { title: String, left: String },
}

impl Exercise {
    pub fn title(&self) -> &str {
        match self {
            Self::Single(exercise) => &exercise.title,
            Self::Multiple(exercise) => &exercise.title,
            Self::FillInBlanks(exercise) => &exercise.title,
            Self::MatchPairs(exercise) => &exercise.title,
        }
    }

    /// Body shown under the title. May contain inline markup.
    pub fn content(&self) -> &str {
        match self {
            Self::Single(exercise) => &exercise.content,
            Self::Multiple(exercise) => &exercise.content,
            Self::FillInBlanks(exercise) => &exercise.content,
            Self::MatchPairs(exercise) => &exercise.content,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Single(_) => "Single Choice",
            Self::Multiple(_) => "Multiple Choice",
            Self::FillInBlanks(_) => "Fill in the Blanks",
            Self::MatchPairs(_) => "Match Pairs",
        }
    }

    /// Check that every correct answer can actually be given.
    pub fn validate(&self) -> Result<(), ExerciseError> {
        let title = self.title();
        if title.trim().is_empty() {
            return Err(ExerciseError::EmptyTitle);
        }

        match self {
            Self::Single(exercise) => check_option_id(title, &exercise.options, &exercise.correct_answer),
            Self::Multiple(exercise) => {
                if exercise.correct_answers.is_empty() {
                    return Err(ExerciseError::NoCorrectOption(title.to_string()));
                }
                exercise
                    .correct_answers
                    .iter()
                    .try_for_each(|id| check_option_id(title, &exercise.options, id))
            }
            Self::FillInBlanks(exercise) => exercise.blanks.iter().try_for_each(|blank| {
                let offered = exercise
                    .correct_answers
                    .get(&blank.id)
                    .is_some_and(|value| exercise.options.contains(value));
                if offered {
                    Ok(())
                } else {
                    Err(ExerciseError::UnanswerableBlank {
                        title: title.to_string(),
                        blank: blank.id.clone(),
                    })
                }
            }),
            Self::MatchPairs(exercise) => {
                if exercise.pairs.is_empty() {
                    return Err(ExerciseError::NoPairs(title.to_string()));
                }
                let mut seen = BTreeSet::new();
                for left in exercise.left_items() {
                    if !seen.insert(left) {
                        return Err(ExerciseError::DuplicateLeft {
                            title: title.to_string(),
                            left: left.to_string(),
                        });
                    }
                }
                Ok(())
            }
        }
    }
}

fn check_option_id(title: &str, options: &[ChoiceOption], id: &str) -> Result<(), ExerciseError> {
    if options.iter().any(|option| option.id == id) {
        Ok(())
    } else {
        Err(ExerciseError::UnknownOption {
            title: title.to_string(),
            id: id.to_string(),
        })
    }
}
