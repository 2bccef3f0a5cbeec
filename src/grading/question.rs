use std::collections::BTreeSet;

use crate::models::{Question, QuestionKind};

use super::{Gradable, Mark};

/// Display order of the two choices of a true/false question.
pub const TRUE_FALSE_OPTIONS: [bool; 2] = [true, false];

/// A submission for an authored [`Question`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Text(String),
    Single(Option<usize>),
    Multiple(BTreeSet<usize>),
    TrueFalse(Option<bool>),
}

impl Answer {
    /// The unanswered state for a question kind.
    pub fn blank(kind: QuestionKind) -> Self {
        match kind {
            QuestionKind::Text => Self::Text(String::new()),
            QuestionKind::Single => Self::Single(None),
            QuestionKind::Multiple => Self::Multiple(BTreeSet::new()),
            QuestionKind::TrueFalse => Self::TrueFalse(None),
        }
    }

    pub fn kind(&self) -> QuestionKind {
        match self {
            Self::Text(_) => QuestionKind::Text,
            Self::Single(_) => QuestionKind::Single,
            Self::Multiple(_) => QuestionKind::Multiple,
            Self::TrueFalse(_) => QuestionKind::TrueFalse,
        }
    }
}

/// Compare a submission against a question's correct answer.
///
/// Text is compared exactly, case included. Multiple choice compares the
/// selected indices as a set. An answer of the wrong kind, or one with no
/// selection, is never correct.
pub fn evaluate(question: &Question, answer: &Answer) -> bool {
    match (question, answer) {
        (Question::Text { answer: reference, .. }, Answer::Text(given)) => given == reference,
        (Question::Single { correct_answer, .. }, Answer::Single(chosen)) => {
            *chosen == Some(*correct_answer)
        }
        (
            Question::Multiple {
                correct_answers, ..
            },
            Answer::Multiple(chosen),
        ) => chosen == correct_answers,
        (Question::TrueFalse { correct_answer, .. }, Answer::TrueFalse(chosen)) => {
            *chosen == Some(*correct_answer)
        }
        _ => false,
    }
}

impl Gradable for Question {
    type Submission = Answer;

    fn empty_submission(&self) -> Answer {
        Answer::blank(self.kind())
    }

    fn is_complete(&self, answer: &Answer) -> bool {
        if answer.kind() != self.kind() {
            return false;
        }
        match answer {
            Answer::Text(text) => !text.is_empty(),
            Answer::Single(chosen) => chosen.is_some_and(|index| index < self.options().len()),
            Answer::Multiple(chosen) => !chosen.is_empty(),
            Answer::TrueFalse(chosen) => chosen.is_some(),
        }
    }

    fn evaluate(&self, answer: &Answer) -> bool {
        evaluate(self, answer)
    }

    fn marks(&self, answer: &Answer) -> Vec<Mark> {
        match (self, answer) {
            (Question::Text { .. }, _) => vec![Mark::for_slot(evaluate(self, answer))],
            (
                Question::Single {
                    options,
                    correct_answer,
                    ..
                },
                Answer::Single(chosen),
            ) => (0..options.len())
                .map(|index| Mark::for_option(*chosen == Some(index), index == *correct_answer))
                .collect(),
            (
                Question::Multiple {
                    options,
                    correct_answers,
                    ..
                },
                Answer::Multiple(chosen),
            ) => (0..options.len())
                .map(|index| {
                    Mark::for_option(chosen.contains(&index), correct_answers.contains(&index))
                })
                .collect(),
            (Question::TrueFalse { correct_answer, .. }, Answer::TrueFalse(chosen)) => {
                TRUE_FALSE_OPTIONS
                    .iter()
                    .map(|value| Mark::for_option(*chosen == Some(*value), value == correct_answer))
                    .collect()
            }
            // Mismatched answer: show the key with nothing chosen.
            (question, _) => question.marks(&question.empty_submission()),
        }
    }
}
