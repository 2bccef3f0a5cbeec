use std::collections::BTreeSet;

use crate::models::{Question, QuestionId, MAX_OPTIONS};

use super::EditorError;

/// The add-question form, before an id is assigned.
///
/// Option lists hold the form's option slots in order; blank slots are
/// dropped when the question is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionDraft {
    Text {
        question: String,
        answer: String,
    },
    Single {
        question: String,
        options: Vec<String>,
        /// Slot index of the correct option.
        correct: usize,
    },
    Multiple {
        question: String,
        /// Option text and whether it is correct.
        options: Vec<(String, bool)>,
    },
    TrueFalse {
        question: String,
        correct: bool,
    },
}

impl QuestionDraft {
    pub(super) fn build(self, id: QuestionId) -> Result<Question, EditorError> {
        match self {
            Self::Text { question, answer } => Ok(Question::Text {
                id,
                question,
                answer,
            }),
            Self::Single {
                question,
                options,
                correct,
            } => {
                check_slot_count(options.len())?;
                if options.get(correct).is_none_or(|option| is_blank(option)) {
                    return Err(EditorError::BlankCorrectOption(correct));
                }
                // Position of the correct slot once blank slots are gone.
                let correct_answer = options[..correct]
                    .iter()
                    .filter(|option| !is_blank(option))
                    .count();
                Ok(Question::Single {
                    id,
                    question,
                    options: options.into_iter().filter(|option| !is_blank(option)).collect(),
                    correct_answer,
                })
            }
            Self::Multiple { question, options } => {
                check_slot_count(options.len())?;
                if let Some(slot) = options.iter().position(|(option, correct)| *correct && is_blank(option)) {
                    return Err(EditorError::BlankCorrectOption(slot));
                }
                let kept: Vec<(String, bool)> = options
                    .into_iter()
                    .filter(|(option, _)| !is_blank(option))
                    .collect();
                let correct_answers: BTreeSet<usize> = kept
                    .iter()
                    .enumerate()
                    .filter(|(_, (_, correct))| *correct)
                    .map(|(index, _)| index)
                    .collect();
                Ok(Question::Multiple {
                    id,
                    question,
                    options: kept.into_iter().map(|(option, _)| option).collect(),
                    correct_answers,
                })
            }
            Self::TrueFalse { question, correct } => Ok(Question::TrueFalse {
                id,
                question,
                correct_answer: correct,
            }),
        }
    }
}

/// A change to one field of an existing question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionEdit {
    Prompt(String),
    /// Reference answer of a text question.
    Answer(String),
    OptionText { index: usize, text: String },
    /// Correct option of a single-choice question.
    CorrectOption(usize),
    /// Add or remove an option from a multiple-choice question's answers.
    ToggleCorrect(usize),
    TrueFalse(bool),
}

impl QuestionEdit {
    fn name(&self) -> &'static str {
        match self {
            Self::Prompt(_) => "the prompt",
            Self::Answer(_) => "the answer",
            Self::OptionText { .. } => "option text",
            Self::CorrectOption(_) => "the correct option",
            Self::ToggleCorrect(_) => "the correct options",
            Self::TrueFalse(_) => "the true/false answer",
        }
    }

    pub(super) fn apply(self, question: &mut Question) -> Result<(), EditorError> {
        let not_applicable = EditorError::NotApplicable {
            edit: self.name(),
            kind: question.kind(),
        };

        match (self, question) {
            (Self::Prompt(text), question) => *question.prompt_mut() = text,
            (Self::Answer(text), Question::Text { answer, .. }) => *answer = text,
            (
                Self::OptionText { index, text },
                Question::Single { options, .. } | Question::Multiple { options, .. },
            ) => {
                let len = options.len();
                let option = options
                    .get_mut(index)
                    .ok_or(EditorError::OptionOutOfRange { index, len })?;
                *option = text;
            }
            (
                Self::CorrectOption(index),
                Question::Single {
                    options,
                    correct_answer,
                    ..
                },
            ) => {
                check_index(index, options.len())?;
                *correct_answer = index;
            }
            (
                Self::ToggleCorrect(index),
                Question::Multiple {
                    options,
                    correct_answers,
                    ..
                },
            ) => {
                check_index(index, options.len())?;
                if !correct_answers.remove(&index) {
                    correct_answers.insert(index);
                }
            }
            (Self::TrueFalse(value), Question::TrueFalse { correct_answer, .. }) => {
                *correct_answer = value
            }
            _ => return Err(not_applicable),
        }
        Ok(())
    }
}

fn is_blank(option: &str) -> bool {
    option.trim().is_empty()
}

fn check_slot_count(slots: usize) -> Result<(), EditorError> {
    if slots > MAX_OPTIONS {
        return Err(EditorError::TooManyOptions(slots));
    }
    Ok(())
}

fn check_index(index: usize, len: usize) -> Result<(), EditorError> {
    if index >= len {
        return Err(EditorError::OptionOutOfRange { index, len });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiple_keeps_flags_with_their_options() {
        let draft = QuestionDraft::Multiple {
            question: "Which are even?".to_string(),
            options: vec![
                ("1".to_string(), false),
                ("".to_string(), false),
                ("2".to_string(), true),
                ("4".to_string(), true),
            ],
        };
        let question = draft.build(QuestionId::from("9")).unwrap();
        assert_eq!(
            question,
            Question::Multiple {
                id: QuestionId::from("9"),
                question: "Which are even?".to_string(),
                options: vec!["1".to_string(), "2".to_string(), "4".to_string()],
                correct_answers: BTreeSet::from([1, 2]),
            }
        );
    }

    #[test]
    fn test_multiple_rejects_blank_correct_option() {
        let draft = QuestionDraft::Multiple {
            question: "Pick letters".to_string(),
            options: vec![
                ("a".to_string(), false),
                ("".to_string(), true),
                ("b".to_string(), true),
            ],
        };
        assert_eq!(
            draft.build(QuestionId::from("9")),
            Err(EditorError::BlankCorrectOption(1))
        );
    }

    #[test]
    fn test_edits_check_bounds() {
        let mut question = Question::Single {
            id: QuestionId::from("1"),
            question: "Pick".to_string(),
            options: vec!["a".to_string(), "b".to_string()],
            correct_answer: 0,
        };
        assert_eq!(
            QuestionEdit::CorrectOption(2).apply(&mut question),
            Err(EditorError::OptionOutOfRange { index: 2, len: 2 })
        );
        QuestionEdit::CorrectOption(1).apply(&mut question).unwrap();
        QuestionEdit::Prompt("Pick one".to_string())
            .apply(&mut question)
            .unwrap();
        assert_eq!(question.prompt(), "Pick one");
        assert_eq!(
            QuestionEdit::TrueFalse(true).apply(&mut question),
            Err(EditorError::NotApplicable {
                edit: "the true/false answer",
                kind: crate::models::QuestionKind::Single,
            })
        );
    }
}
