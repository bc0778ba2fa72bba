// src/models/response.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'responses' table in the database.
/// At most one row exists per (student_id, prompt_id).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Response {
    pub id: i64,
    pub prompt_id: i64,
    pub student_id: i64,
    pub content: String,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

/// A student's own response joined with its prompt and grade.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudentResponseRow {
    pub id: i64,
    pub prompt_id: i64,
    pub prompt_title: String,
    pub content: String,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub score: Option<i64>,
    pub feedback: Option<String>,
}

/// A response to one prompt joined with its author and grade, for grading.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PromptResponseRow {
    pub id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub year_level: Option<i64>,
    pub content: String,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub score: Option<i64>,
    pub feedback: Option<String>,
}

/// DTO for submitting an answer to a prompt.
#[derive(Debug, Deserialize)]
pub struct SubmitResponseForm {
    #[serde(default)]
    pub content: String,
}

/// Validated answer text, trimmed.
#[derive(Debug, Validate)]
pub struct SubmitResponseRequest {
    #[validate(length(
        min = 1,
        max = 20000,
        message = "Response must be between 1 and 20000 characters."
    ))]
    pub content: String,
}

impl From<SubmitResponseForm> for SubmitResponseRequest {
    fn from(form: SubmitResponseForm) -> Self {
        Self {
            content: form.content.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(content: &str) -> SubmitResponseRequest {
        SubmitResponseRequest::from(SubmitResponseForm {
            content: content.to_string(),
        })
    }

    #[test]
    fn trims_and_accepts_text() {
        let req = request("  Light to sugar.\n");
        assert_eq!(req.content, "Light to sugar.");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn rejects_blank_and_oversized() {
        assert!(request("   ").validate().is_err());
        assert!(request(&"a".repeat(20001)).validate().is_err());
        assert!(request(&"a".repeat(20000)).validate().is_ok());
    }
}
