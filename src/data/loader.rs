use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{Exercise, ExerciseError, Question, QuestionError};

/// Errors raised while loading a question or exercise file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{} must contain at least one entry", .0.display())]
    Empty(PathBuf),
    #[error(transparent)]
    Invalid(#[from] QuestionError),
    #[error(transparent)]
    InvalidExercise(#[from] ExerciseError),
}

/// Load a JSON array of questions, in the same shape quiz records embed them.
pub fn load_questions_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, LoadError> {
    let path = path.as_ref();
    let questions: Vec<Question> = read_json_array(path)?;
    for question in &questions {
        question.validate()?;
    }

    log::info!("loaded {} questions from {}", questions.len(), path.display());
    Ok(questions)
}

/// Load a JSON array of `type`-tagged exercises.
pub fn load_exercises_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<Exercise>, LoadError> {
    let path = path.as_ref();
    let exercises: Vec<Exercise> = read_json_array(path)?;
    for exercise in &exercises {
        exercise.validate()?;
    }

    log::info!("loaded {} exercises from {}", exercises.len(), path.display());
    Ok(exercises)
}

fn read_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, LoadError> {
    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let entries: Vec<T> = serde_json::from_str(&json_content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if entries.is_empty() {
        return Err(LoadError::Empty(path.to_path_buf()));
    }
    Ok(entries)
}
