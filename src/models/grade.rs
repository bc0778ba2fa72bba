// src/models/grade.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::error::AppError;

/// Inclusive bounds for a grade score, mirrored by the `grades.score` CHECK.
pub const MIN_SCORE: i64 = 0;
pub const MAX_SCORE: i64 = 100;

/// Represents the 'grades' table in the database.
/// One row per graded response; re-grading updates it in place.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Grade {
    pub id: i64,
    pub response_id: i64,
    pub teacher_id: i64,
    pub score: i64,
    pub feedback: String,
    pub graded_at: chrono::DateTime<chrono::Utc>,
}

/// Whether a grading call inserted a new row or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeOutcome {
    Created,
    Updated,
}

/// Raw grading form; `score` stays textual until validated.
#[derive(Debug, Deserialize)]
pub struct GradeForm {
    #[serde(default)]
    pub score: String,
    #[serde(default)]
    pub feedback: String,
}

/// Validated grading input.
#[derive(Debug, Validate)]
pub struct GradeRequest {
    #[validate(range(min = MIN_SCORE, max = MAX_SCORE, message = "Score must be between 0 and 100."))]
    pub score: i64,
    #[validate(length(max = 5000, message = "Feedback must be at most 5000 characters."))]
    pub feedback: String,
}

impl GradeRequest {
    /// Parses and validates a grading form. Out-of-range scores are rejected, never clamped.
    pub fn parse(form: GradeForm) -> Result<Self, AppError> {
        let score = form.score.trim().parse::<i64>().map_err(|_| {
            AppError::BadRequest(format!(
                "Score must be an integer between {} and {}.",
                MIN_SCORE, MAX_SCORE
            ))
        })?;

        let req = Self {
            score,
            feedback: form.feedback.trim().to_string(),
        };
        req.validate()?;
        Ok(req)
    }
}
