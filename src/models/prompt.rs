// src/models/prompt.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'prompts' table in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Prompt {
    pub id: i64,

    /// Authoring teacher.
    pub teacher_id: i64,

    pub title: String,
    pub content: String,
    pub subject: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A prompt joined with its author's name, as shown to students.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PromptListItem {
    pub id: i64,
    pub title: String,
    pub subject: String,
    pub teacher_name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A teacher's own prompt with submission counts for the dashboard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PromptSummary {
    pub id: i64,
    pub title: String,
    pub subject: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub response_count: i64,
    pub pending_count: i64,
}

/// Raw form for creating a prompt.
#[derive(Debug, Deserialize)]
pub struct PromptForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub subject: String,
}

/// DTO for creating a new prompt.
#[derive(Debug, Validate)]
pub struct CreatePromptRequest {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title length must be between 1 and 200 chars"
    ))]
    pub title: String,

    #[validate(length(
        min = 1,
        max = 10000,
        message = "Content length must be between 1 and 10000 chars"
    ))]
    pub content: String,

    #[validate(length(min = 1, max = 50, message = "Subject must be at most 50 chars"))]
    pub subject: String,
}

impl From<PromptForm> for CreatePromptRequest {
    fn from(form: PromptForm) -> Self {
        let subject = form.subject.trim();
        Self {
            title: form.title.trim().to_string(),
            content: form.content.trim().to_string(),
            subject: if subject.is_empty() {
                "General".to_string()
            } else {
                subject.to_string()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_subject_falls_back_to_general() {
        let req = CreatePromptRequest::from(PromptForm {
            title: " Plants ".to_string(),
            content: "Describe photosynthesis".to_string(),
            subject: "   ".to_string(),
        });
        assert_eq!(req.subject, "General");
        assert_eq!(req.title, "Plants");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn whitespace_only_content_is_invalid() {
        let req = CreatePromptRequest::from(PromptForm {
            title: "Plants".to_string(),
            content: " \n ".to_string(),
            subject: String::new(),
        });
        assert!(req.validate().is_err());
    }
}
