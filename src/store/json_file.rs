use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::{NewQuiz, QuizRecord};

use super::{check_record, QuizStore, StoreError};

/// A store backed by a single JSON file holding an array of records.
///
/// Every operation reads the whole file and writes it back; a missing file
/// is an empty store.
pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Vec<QuizRecord>, StoreError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(self.io_error(source)),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })
    }

    async fn write_all(&self, records: &[QuizRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(records).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| self.io_error(source))?;
        }

        // Write beside the target, then swap it in.
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, json)
            .await
            .map_err(|source| self.io_error(source))?;
        fs::rename(&staging, &self.path)
            .await
            .map_err(|source| self.io_error(source))
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl QuizStore for JsonFileStore {
    async fn list(&self, owner: &str) -> Result<Vec<QuizRecord>, StoreError> {
        let _guard = self.lock.lock().await;
        let mut quizzes: Vec<QuizRecord> = self
            .read_all()
            .await?
            .into_iter()
            .filter(|quiz| quiz.user_id == owner)
            .collect();
        quizzes.sort_by_key(|quiz| quiz.created_at);
        Ok(quizzes)
    }

    async fn create(&self, owner: &str, quiz: NewQuiz) -> Result<QuizRecord, StoreError> {
        check_record(&quiz.title, &quiz.description)?;

        let _guard = self.lock.lock().await;
        let mut records = self.read_all().await?;
        let record = QuizRecord::new(owner, quiz);
        records.push(record.clone());
        self.write_all(&records).await?;

        log::info!("created quiz {} for {}", record.id, owner);
        Ok(record)
    }

    async fn get(&self, id: Uuid) -> Result<QuizRecord, StoreError> {
        let _guard = self.lock.lock().await;
        self.read_all()
            .await?
            .into_iter()
            .find(|quiz| quiz.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    async fn update(&self, record: &QuizRecord) -> Result<(), StoreError> {
        check_record(&record.title, &record.description)?;
        for question in &record.questions {
            question
                .validate()
                .map_err(|err| StoreError::Invalid(err.to_string()))?;
        }

        let _guard = self.lock.lock().await;
        let mut records = self.read_all().await?;
        let stored = records
            .iter_mut()
            .find(|quiz| quiz.id == record.id)
            .ok_or(StoreError::NotFound(record.id))?;

        stored.title = record.title.clone();
        stored.description = record.description.clone();
        stored.questions = record.questions.clone();
        self.write_all(&records).await?;

        log::info!(
            "updated quiz {} ({} questions)",
            record.id,
            record.questions.len()
        );
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut records = self.read_all().await?;
        let before = records.len();
        records.retain(|quiz| quiz.id != id);
        if records.len() == before {
            return Err(StoreError::NotFound(id));
        }
        self.write_all(&records).await?;

        log::info!("deleted quiz {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Question, QuestionId};
    use crate::test_support::ScratchDir;

    /// The scratch directory must outlive the store.
    fn temp_store() -> (ScratchDir, JsonFileStore) {
        let scratch = ScratchDir::new();
        let store = JsonFileStore::new(scratch.path("quizzes.json"));
        (scratch, store)
    }

    fn new_quiz(title: &str) -> NewQuiz {
        NewQuiz {
            title: title.to_string(),
            description: "A quiz".to_string(),
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let (_scratch, store) = temp_store();
        assert!(store.list("alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_only_returns_owned_quizzes() {
        let (_scratch, store) = temp_store();
        let first = store.create("alice", new_quiz("Capitals")).await.unwrap();
        store.create("bob", new_quiz("Rivers")).await.unwrap();
        let second = store.create("alice", new_quiz("Mountains")).await.unwrap();

        let titles: Vec<String> = store
            .list("alice")
            .await
            .unwrap()
            .into_iter()
            .map(|quiz| quiz.title)
            .collect();
        assert_eq!(titles, vec!["Capitals", "Mountains"]);
        assert_eq!(store.get(first.id).await.unwrap(), first);
        assert_eq!(store.get(second.id).await.unwrap().user_id, "alice");
    }

    #[tokio::test]
    async fn test_create_requires_title() {
        let (_scratch, store) = temp_store();
        let result = store.create("alice", new_quiz("  ")).await;
        assert!(matches!(result, Err(StoreError::Invalid(_))));
    }

    #[tokio::test]
    async fn test_update_replaces_questions() {
        let (_scratch, store) = temp_store();
        let mut quiz = store.create("alice", new_quiz("Capitals")).await.unwrap();
        quiz.title = "European capitals".to_string();
        quiz.questions.push(Question::Text {
            id: QuestionId::from("1"),
            question: "Capital of France?".to_string(),
            answer: "Paris".to_string(),
        });
        store.update(&quiz).await.unwrap();

        let stored = store.get(quiz.id).await.unwrap();
        assert_eq!(stored.title, "European capitals");
        assert_eq!(stored.question_count(), 1);
        assert_eq!(stored.created_at, quiz.created_at);
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_question() {
        let (_scratch, store) = temp_store();
        let mut quiz = store.create("alice", new_quiz("Capitals")).await.unwrap();
        quiz.questions.push(Question::Single {
            id: QuestionId::from("1"),
            question: "Pick".to_string(),
            options: vec!["a".to_string(), "b".to_string()],
            correct_answer: 5,
        });
        assert!(matches!(store.update(&quiz).await, Err(StoreError::Invalid(_))));
    }

    #[tokio::test]
    async fn test_delete() {
        let (_scratch, store) = temp_store();
        let quiz = store.create("alice", new_quiz("Capitals")).await.unwrap();
        store.delete(quiz.id).await.unwrap();

        assert!(matches!(store.get(quiz.id).await, Err(StoreError::NotFound(_))));
        assert!(matches!(store.delete(quiz.id).await, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_writes_leave_only_the_store_file() {
        let (scratch, store) = temp_store();
        store.create("alice", new_quiz("Capitals")).await.unwrap();

        let names: Vec<_> = std::fs::read_dir(scratch.dir())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("quizzes.json")]);

        let dir = scratch.dir().clone();
        drop(store);
        drop(scratch);
        assert!(!dir.exists());
    }
}
