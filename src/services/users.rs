// src/services/users.rs

use chrono::Utc;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::{AppError, conflict_on_unique},
    models::user::{CreateUserRequest, Role, User},
    utils::hash::{hash_password, verify_password},
};

/// Registers a new user.
///
/// Hashes the password using Argon2 before storing it. A taken name is a
/// `Conflict`, detected by the unique index on `users.name`.
pub async fn create(pool: &SqlitePool, req: &CreateUserRequest) -> Result<User, AppError> {
    req.validate()?;

    let hashed_password = hash_password(&req.password)?;

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (name, password, role, year_level, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, name, password, role, year_level, created_at
        "#,
    )
    .bind(&req.name)
    .bind(&hashed_password)
    .bind(req.role)
    .bind(req.year_level)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .map_err(|e| conflict_on_unique(e, "Username already exists. Choose another."))?;

    tracing::info!(user_id = user.id, role = %user.role, "Registered user {}", user.name);
    Ok(user)
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, password, role, year_level, created_at FROM users WHERE name = ?",
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Checks a name/password pair. Unknown names and wrong passwords fail the
/// same way so the form does not reveal which names exist.
pub async fn authenticate(pool: &SqlitePool, name: &str, password: &str) -> Result<User, AppError> {
    let invalid = || AppError::BadRequest("Invalid username or password.".to_string());

    let user = find_by_name(pool, name.trim()).await?.ok_or_else(invalid)?;

    if !verify_password(password, &user.password)? {
        tracing::info!("Failed login for {}", user.name);
        return Err(invalid());
    }

    Ok(user)
}

/// Creates the bootstrap teacher account if it does not exist yet.
pub async fn seed_teacher(pool: &SqlitePool, name: &str, password: &str) -> Result<(), AppError> {
    if find_by_name(pool, name).await?.is_some() {
        return Ok(());
    }

    tracing::info!("Seeding teacher account: {}", name);
    create(
        pool,
        &CreateUserRequest {
            name: name.to_string(),
            password: password.to_string(),
            role: Role::Teacher,
            year_level: None,
        },
    )
    .await?;
    Ok(())
}
