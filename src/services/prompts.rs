// src/services/prompts.rs

use chrono::Utc;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    models::prompt::{CreatePromptRequest, Prompt, PromptListItem, PromptSummary},
};

/// Creates a prompt authored by `teacher_id`. It is visible to every student immediately.
pub async fn create(
    pool: &SqlitePool,
    teacher_id: i64,
    req: &CreatePromptRequest,
) -> Result<Prompt, AppError> {
    req.validate()?;

    let prompt = sqlx::query_as::<_, Prompt>(
        r#"
        INSERT INTO prompts (teacher_id, title, content, subject, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, teacher_id, title, content, subject, created_at
        "#,
    )
    .bind(teacher_id)
    .bind(&req.title)
    .bind(&req.content)
    .bind(&req.subject)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create prompt: {:?}", e);
        AppError::from(e)
    })?;

    tracing::info!(prompt_id = prompt.id, teacher_id, "Prompt created");
    Ok(prompt)
}

/// All prompts, newest first.
pub async fn list(pool: &SqlitePool) -> Result<Vec<PromptListItem>, AppError> {
    let prompts = sqlx::query_as::<_, PromptListItem>(
        r#"
        SELECT p.id, p.title, p.subject, u.name AS teacher_name, p.created_at
        FROM prompts p
        JOIN users u ON u.id = p.teacher_id
        ORDER BY p.created_at DESC, p.id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(prompts)
}

/// A teacher's own prompts, newest first, with response and pending counts.
pub async fn list_for_teacher(
    pool: &SqlitePool,
    teacher_id: i64,
) -> Result<Vec<PromptSummary>, AppError> {
    let prompts = sqlx::query_as::<_, PromptSummary>(
        r#"
        SELECT
            p.id, p.title, p.subject, p.created_at,
            COUNT(r.id) AS response_count,
            COUNT(r.id) - COUNT(g.id) AS pending_count
        FROM prompts p
        LEFT JOIN responses r ON r.prompt_id = p.id
        LEFT JOIN grades g ON g.response_id = r.id
        WHERE p.teacher_id = ?
        GROUP BY p.id
        ORDER BY p.created_at DESC, p.id DESC
        "#,
    )
    .bind(teacher_id)
    .fetch_all(pool)
    .await?;

    Ok(prompts)
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Prompt, AppError> {
    sqlx::query_as::<_, Prompt>(
        "SELECT id, teacher_id, title, content, subject, created_at FROM prompts WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Prompt not found".to_string()))
}
