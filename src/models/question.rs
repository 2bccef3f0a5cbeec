use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of an authored question.
///
/// Fresh identifiers are derived from the creation time: milliseconds since
/// the Unix epoch, rendered as a decimal string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub String);

impl QuestionId {
    pub fn from_millis(millis: i64) -> Self {
        Self(millis.to_string())
    }

    /// Identifier for a question authored right now.
    pub fn now() -> Self {
        Self::from_millis(chrono::Utc::now().timestamp_millis())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The creation time encoded in the identifier, if it is numeric.
    pub fn millis(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// The kind tag of a [`Question`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Text,
    Single,
    Multiple,
    TrueFalse,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 4] = [Self::Text, Self::Single, Self::Multiple, Self::TrueFalse];

    /// Human readable label used by the editor and the player.
    pub fn label(self) -> &'static str {
        match self {
            Self::Text => "Text Answer",
            Self::Single => "Single Choice",
            Self::Multiple => "Multiple Choice",
            Self::TrueFalse => "True/False",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An authored question as embedded in a quiz record.
///
/// Serialized with a `type` tag (`text`, `single`, `multiple`, `truefalse`)
/// and camelCase fields, so stored documents read like:
///
/// ```json
/// { "id": "1718000000000", "type": "single", "question": "Capital of France?",
///   "options": ["London", "Paris"], "correctAnswer": 1 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum Question {
    /// Free-form answer, compared by exact string match.
    Text {
        id: QuestionId,
        question: String,
        answer: String,
    },
    /// Exactly one correct option.
    Single {
        id: QuestionId,
        question: String,
        options: Vec<String>,
        correct_answer: usize,
    },
    /// A set of correct options; order does not matter.
    Multiple {
        id: QuestionId,
        question: String,
        options: Vec<String>,
        correct_answers: BTreeSet<usize>,
    },
    TrueFalse {
        id: QuestionId,
        question: String,
        correct_answer: bool,
    },
}

/// Data-integrity defects in an authored question.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionError {
    #[error("question {0} has an empty prompt")]
    EmptyPrompt(QuestionId),
    #[error("question {id} needs at least {min} options, found {found}")]
    TooFewOptions {
        id: QuestionId,
        min: usize,
        found: usize,
    },
    #[error("question {id} marks option {index} as correct but only has {len} options")]
    CorrectIndexOutOfRange {
        id: QuestionId,
        index: usize,
        len: usize,
    },
    #[error("question {0} has no correct option")]
    NoCorrectOption(QuestionId),
}

impl Question {
    pub fn id(&self) -> &QuestionId {
        match self {
            Self::Text { id, .. }
            | Self::Single { id, .. }
            | Self::Multiple { id, .. }
            | Self::TrueFalse { id, .. } => id,
        }
    }

    /// The question prompt.
    pub fn prompt(&self) -> &str {
        match self {
            Self::Text { question, .. }
            | Self::Single { question, .. }
            | Self::Multiple { question, .. }
            | Self::TrueFalse { question, .. } => question,
        }
    }

    pub fn prompt_mut(&mut self) -> &mut String {
        match self {
            Self::Text { question, .. }
            | Self::Single { question, .. }
            | Self::Multiple { question, .. }
            | Self::TrueFalse { question, .. } => question,
        }
    }

    pub fn kind(&self) -> QuestionKind {
        match self {
            Self::Text { .. } => QuestionKind::Text,
            Self::Single { .. } => QuestionKind::Single,
            Self::Multiple { .. } => QuestionKind::Multiple,
            Self::TrueFalse { .. } => QuestionKind::TrueFalse,
        }
    }

    /// Option list for choice questions, empty for the other kinds.
    pub fn options(&self) -> &[String] {
        match self {
            Self::Single { options, .. } | Self::Multiple { options, .. } => options,
            Self::Text { .. } | Self::TrueFalse { .. } => &[],
        }
    }

    /// Check the data model invariants.
    ///
    /// Only the authoring surface calls this; evaluation assumes a valid
    /// question.
    pub fn validate(&self) -> Result<(), QuestionError> {
        let id = self.id();
        if self.prompt().trim().is_empty() {
            return Err(QuestionError::EmptyPrompt(id.clone()));
        }

        match self {
            Self::Text { .. } | Self::TrueFalse { .. } => Ok(()),
            Self::Single {
                options,
                correct_answer,
                ..
            } => {
                check_option_count(id, options)?;
                check_index(id, *correct_answer, options.len())
            }
            Self::Multiple {
                options,
                correct_answers,
                ..
            } => {
                check_option_count(id, options)?;
                if correct_answers.is_empty() {
                    return Err(QuestionError::NoCorrectOption(id.clone()));
                }
                correct_answers
                    .iter()
                    .try_for_each(|index| check_index(id, *index, options.len()))
            }
        }
    }
}

/// Minimum number of options for a choice question.
pub const MIN_OPTIONS: usize = 2;

/// Maximum number of options the authoring form offers.
pub const MAX_OPTIONS: usize = 4;

fn check_option_count(id: &QuestionId, options: &[String]) -> Result<(), QuestionError> {
    if options.len() < MIN_OPTIONS {
        return Err(QuestionError::TooFewOptions {
            id: id.clone(),
            min: MIN_OPTIONS,
            found: options.len(),
        });
    }
    Ok(())
}

fn check_index(id: &QuestionId, index: usize, len: usize) -> Result<(), QuestionError> {
    if index >= len {
        return Err(QuestionError::CorrectIndexOutOfRange {
            id: id.clone(),
            index,
            len,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(correct_answer: usize) -> Question {
        Question::Single {
            id: QuestionId::from("1"),
            question: "Capital of France?".to_string(),
            options: vec!["London".to_string(), "Paris".to_string()],
            correct_answer,
        }
    }

    #[test]
    fn test_serializes_with_type_tag_and_camel_case() {
        let json = serde_json::to_value(single(1)).unwrap();
        assert_eq!(json["type"], "single");
        assert_eq!(json["correctAnswer"], 1);
        assert_eq!(json["id"], "1");

        let tf = Question::TrueFalse {
            id: QuestionId::from("2"),
            question: "Rust is memory safe".to_string(),
            correct_answer: true,
        };
        let json = serde_json::to_value(tf).unwrap();
        assert_eq!(json["type"], "truefalse");
        assert_eq!(json["correctAnswer"], true);
    }

    #[test]
    fn test_deserializes_stored_document() {
        let json = r#"{
            "id": "1700000000000",
            "type": "multiple",
            "question": "Which are languages?",
            "options": ["Python", "HTML", "JavaScript", "CSS"],
            "correctAnswers": [2, 0, 2]
        }"#;
        let question: Question = serde_json::from_str(json).unwrap();
        assert_eq!(question.kind(), QuestionKind::Multiple);
        match question {
            Question::Multiple {
                correct_answers, ..
            } => assert_eq!(correct_answers.into_iter().collect::<Vec<_>>(), vec![0, 2]),
            other => panic!("unexpected question: {:?}", other),
        }
    }

    #[test]
    fn test_validate() {
        assert!(single(1).validate().is_ok());
        assert_eq!(
            single(2).validate(),
            Err(QuestionError::CorrectIndexOutOfRange {
                id: QuestionId::from("1"),
                index: 2,
                len: 2,
            })
        );

        let empty = Question::Text {
            id: QuestionId::from("3"),
            question: "   ".to_string(),
            answer: "x".to_string(),
        };
        assert!(matches!(empty.validate(), Err(QuestionError::EmptyPrompt(_))));
    }

    #[test]
    fn test_question_id_from_millis() {
        let id = QuestionId::from_millis(1_700_000_000_123);
        assert_eq!(id.as_str(), "1700000000123");
        assert_eq!(id.millis(), Some(1_700_000_000_123));
    }
}
