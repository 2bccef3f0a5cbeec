use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Question;

/// A stored quiz document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizRecord {
    pub id: Uuid,
    /// Owner of the quiz.
    pub user_id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub questions: Vec<Question>,
    pub created_at: DateTime<Utc>,
}

impl QuizRecord {
    /// Create a fresh record for `owner` with an empty question list.
    pub fn new(owner: &str, quiz: NewQuiz) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: owner.to_string(),
            title: quiz.title,
            description: quiz.description,
            questions: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

/// Payload for creating a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuiz {
    pub title: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_uses_camel_case_fields() {
        let record = QuizRecord::new(
            "alice",
            NewQuiz {
                title: "Capitals".to_string(),
                description: "European capitals".to_string(),
            },
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["userId"], "alice");
        assert!(json["createdAt"].is_string());
        assert_eq!(json["questions"], serde_json::json!([]));
        assert_eq!(record.question_count(), 0);
    }

    #[test]
    fn test_missing_question_list_defaults_to_empty() {
        let json = r#"{
            "id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "userId": "bob",
            "title": "t",
            "description": "d",
            "createdAt": "2024-05-01T10:00:00Z"
        }"#;
        let record: QuizRecord = serde_json::from_str(json).unwrap();
        assert!(record.questions.is_empty());
    }
}
