//! Editing a quiz's question list.
//!
//! [`QuizEditor`] holds a loaded [`QuizRecord`] while the author adds,
//! changes and removes questions. Nothing is persisted until the finished
//! record is handed back to a [`QuizStore`](crate::store::QuizStore).

mod draft;

use thiserror::Error;

use crate::models::{Question, QuestionError, QuestionId, QuestionKind, QuizRecord, MAX_OPTIONS};

pub use draft::{QuestionDraft, QuestionEdit};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error(transparent)]
    Invalid(#[from] QuestionError),
    #[error("a question can have at most {} options, got {0}", MAX_OPTIONS)]
    TooManyOptions(usize),
    #[error("the correct option (slot {0}) is blank")]
    BlankCorrectOption(usize),
    #[error("no question with id {0}")]
    UnknownQuestion(QuestionId),
    #[error("option {index} does not exist, the question has {len} options")]
    OptionOutOfRange { index: usize, len: usize },
    #[error("cannot change {edit} of a {kind} question")]
    NotApplicable {
        edit: &'static str,
        kind: QuestionKind,
    },
}

pub struct QuizEditor {
    record: QuizRecord,
    last_id: Option<i64>,
}

impl QuizEditor {
    pub fn new(record: QuizRecord) -> Self {
        Self {
            record,
            last_id: None,
        }
    }

    pub fn record(&self) -> &QuizRecord {
        &self.record
    }

    pub fn questions(&self) -> &[Question] {
        &self.record.questions
    }

    pub fn set_title(&mut self, title: &str) {
        self.record.title = title.to_string();
    }

    pub fn set_description(&mut self, description: &str) {
        self.record.description = description.to_string();
    }

    /// Build a question from a draft and append it to the list.
    pub fn add_question(&mut self, draft: QuestionDraft) -> Result<&Question, EditorError> {
        let millis = self.next_id_millis(chrono::Utc::now().timestamp_millis());
        let question = draft.build(QuestionId::from_millis(millis))?;
        question.validate()?;

        self.last_id = Some(millis);
        self.record.questions.push(question);
        log::debug!("added question {} to quiz {}", millis, self.record.id);
        Ok(&self.record.questions[self.record.questions.len() - 1])
    }

    /// Change one field of an existing question in place.
    pub fn edit_question(&mut self, id: &QuestionId, edit: QuestionEdit) -> Result<(), EditorError> {
        let question = self
            .record
            .questions
            .iter_mut()
            .find(|question| question.id() == id)
            .ok_or_else(|| EditorError::UnknownQuestion(id.clone()))?;
        edit.apply(question)
    }

    pub fn delete_question(&mut self, id: &QuestionId) -> Result<Question, EditorError> {
        let position = self
            .record
            .questions
            .iter()
            .position(|question| question.id() == id)
            .ok_or_else(|| EditorError::UnknownQuestion(id.clone()))?;
        Ok(self.record.questions.remove(position))
    }

    /// The edited record, ready to be saved.
    pub fn finish(self) -> QuizRecord {
        self.record
    }

    /// Creation-time id, bumped past any id already handed out or stored.
    fn next_id_millis(&self, now: i64) -> i64 {
        let mut millis = match self.last_id {
            Some(last) if now <= last => last + 1,
            _ => now,
        };
        while self
            .record
            .questions
            .iter()
            .any(|question| question.id().millis() == Some(millis))
        {
            millis += 1;
        }
        millis
    }
}
