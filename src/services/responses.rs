// src/services/responses.rs

use chrono::Utc;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::{AppError, conflict_on_unique},
    models::response::{PromptResponseRow, Response, StudentResponseRow, SubmitResponseRequest},
    services::prompts,
};

/// Records a student's answer to a prompt.
///
/// The `UNIQUE (student_id, prompt_id)` index is the only duplicate check:
/// two concurrent submissions race on the insert and exactly one wins.
pub async fn submit(
    pool: &SqlitePool,
    student_id: i64,
    prompt_id: i64,
    req: &SubmitResponseRequest,
) -> Result<Response, AppError> {
    req.validate()?;

    prompts::get(pool, prompt_id).await?;

    let response = sqlx::query_as::<_, Response>(
        r#"
        INSERT INTO responses (prompt_id, student_id, content, submitted_at)
        VALUES (?, ?, ?, ?)
        RETURNING id, prompt_id, student_id, content, submitted_at
        "#,
    )
    .bind(prompt_id)
    .bind(student_id)
    .bind(&req.content)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .map_err(|e| conflict_on_unique(e, "You have already responded to this prompt."))?;

    tracing::info!(response_id = response.id, prompt_id, student_id, "Response submitted");
    Ok(response)
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Response, AppError> {
    sqlx::query_as::<_, Response>(
        "SELECT id, prompt_id, student_id, content, submitted_at FROM responses WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Response not found".to_string()))
}

/// The student's answer to one prompt, if they have submitted one.
pub async fn find_for_student_and_prompt(
    pool: &SqlitePool,
    student_id: i64,
    prompt_id: i64,
) -> Result<Option<StudentResponseRow>, AppError> {
    let row = sqlx::query_as::<_, StudentResponseRow>(
        r#"
        SELECT
            r.id, r.prompt_id, p.title AS prompt_title, r.content, r.submitted_at,
            g.score, g.feedback
        FROM responses r
        JOIN prompts p ON p.id = r.prompt_id
        LEFT JOIN grades g ON g.response_id = r.id
        WHERE r.student_id = ? AND r.prompt_id = ?
        "#,
    )
    .bind(student_id)
    .bind(prompt_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// All of a student's responses, newest first, with grades where present.
pub async fn list_for_student(
    pool: &SqlitePool,
    student_id: i64,
) -> Result<Vec<StudentResponseRow>, AppError> {
    let rows = sqlx::query_as::<_, StudentResponseRow>(
        r#"
        SELECT
            r.id, r.prompt_id, p.title AS prompt_title, r.content, r.submitted_at,
            g.score, g.feedback
        FROM responses r
        JOIN prompts p ON p.id = r.prompt_id
        LEFT JOIN grades g ON g.response_id = r.id
        WHERE r.student_id = ?
        ORDER BY r.submitted_at DESC, r.id DESC
        "#,
    )
    .bind(student_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// All responses to a prompt in submission order, with grades where present.
pub async fn list_for_prompt(
    pool: &SqlitePool,
    prompt_id: i64,
) -> Result<Vec<PromptResponseRow>, AppError> {
    let rows = sqlx::query_as::<_, PromptResponseRow>(
        r#"
        SELECT
            r.id, r.student_id, u.name AS student_name, u.year_level,
            r.content, r.submitted_at,
            g.score, g.feedback
        FROM responses r
        JOIN users u ON u.id = r.student_id
        LEFT JOIN grades g ON g.response_id = r.id
        WHERE r.prompt_id = ?
        ORDER BY r.submitted_at ASC, r.id ASC
        "#,
    )
    .bind(prompt_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
