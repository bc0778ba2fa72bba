// src/services/grades.rs

use chrono::Utc;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    models::grade::{Grade, GradeOutcome, GradeRequest},
};

/// Grades a response, or re-grades it if a grade already exists.
///
/// * Validates the score range before touching the database.
/// * Only the teacher who authored the prompt may grade its responses.
/// * Each write is a single statement keyed on `grades.response_id`, so a
///   response never has two grades and concurrent graders only wait on the
///   database write lock.
pub async fn grade(
    pool: &SqlitePool,
    response_id: i64,
    teacher_id: i64,
    req: &GradeRequest,
) -> Result<(Grade, GradeOutcome), AppError> {
    req.validate()?;

    let author_id = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT p.teacher_id
        FROM responses r
        JOIN prompts p ON p.id = r.prompt_id
        WHERE r.id = ?
        "#,
    )
    .bind(response_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Response not found".to_string()))?;

    if author_id != teacher_id {
        return Err(AppError::Forbidden(
            "You are not authorized to grade this response.".to_string(),
        ));
    }

    let now = Utc::now();

    let inserted = sqlx::query_as::<_, Grade>(
        r#"
        INSERT INTO grades (response_id, teacher_id, score, feedback, graded_at)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT(response_id) DO NOTHING
        RETURNING id, response_id, teacher_id, score, feedback, graded_at
        "#,
    )
    .bind(response_id)
    .bind(teacher_id)
    .bind(req.score)
    .bind(&req.feedback)
    .bind(now)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to insert grade: {:?}", e);
        AppError::from(e)
    })?;

    let (grade, outcome) = match inserted {
        Some(grade) => (grade, GradeOutcome::Created),
        None => {
            let grade = sqlx::query_as::<_, Grade>(
                r#"
                UPDATE grades
                SET teacher_id = ?, score = ?, feedback = ?, graded_at = ?
                WHERE response_id = ?
                RETURNING id, response_id, teacher_id, score, feedback, graded_at
                "#,
            )
            .bind(teacher_id)
            .bind(req.score)
            .bind(&req.feedback)
            .bind(now)
            .bind(response_id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update grade: {:?}", e);
                AppError::from(e)
            })?
            .ok_or_else(|| AppError::NotFound("Response not found".to_string()))?;
            (grade, GradeOutcome::Updated)
        }
    };

    tracing::info!(response_id, teacher_id, score = grade.score, ?outcome, "Response graded");

    Ok((grade, outcome))
}

pub async fn find_for_response(
    pool: &SqlitePool,
    response_id: i64,
) -> Result<Option<Grade>, AppError> {
    let grade = sqlx::query_as::<_, Grade>(
        r#"
        SELECT id, response_id, teacher_id, score, feedback, graded_at
        FROM grades
        WHERE response_id = ?
        "#,
    )
    .bind(response_id)
    .fetch_optional(pool)
    .await?;

    Ok(grade)
}
