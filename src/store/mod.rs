//! Quiz persistence.
//!
//! [`QuizStore`] is the seam to the document store that holds quiz
//! records. [`JsonFileStore`] keeps every record in one JSON file.

mod json_file;

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

use crate::models::{NewQuiz, QuizRecord};

pub use json_file::JsonFileStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed store file {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("quiz not found: {0}")]
    NotFound(Uuid),
    #[error("invalid quiz: {0}")]
    Invalid(String),
}

/// Create, read, update and delete quiz records.
#[allow(async_fn_in_trait)]
pub trait QuizStore {
    /// Every quiz owned by `owner`, oldest first.
    async fn list(&self, owner: &str) -> Result<Vec<QuizRecord>, StoreError>;

    /// Store a new, empty quiz for `owner`.
    async fn create(&self, owner: &str, quiz: NewQuiz) -> Result<QuizRecord, StoreError>;

    async fn get(&self, id: Uuid) -> Result<QuizRecord, StoreError>;

    /// Replace the title, description and questions of a stored quiz.
    async fn update(&self, record: &QuizRecord) -> Result<(), StoreError>;

    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

/// Reject records the authoring surface should never have produced.
pub(crate) fn check_record(title: &str, description: &str) -> Result<(), StoreError> {
    if title.trim().is_empty() {
        return Err(StoreError::Invalid("title is required".to_string()));
    }
    if description.trim().is_empty() {
        return Err(StoreError::Invalid("description is required".to_string()));
    }
    Ok(())
}
