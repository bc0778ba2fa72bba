// src/handlers/leaderboard.rs

use axum::{Extension, extract::State, response::IntoResponse};
use axum_extra::extract::cookie::CookieJar;
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    services::leaderboard,
    utils::{flash::take_flash, jwt::Claims},
    views::{LeaderboardPage, Page, render},
};

/// Students ranked by average grade. Recomputed on every view.
pub async fn show(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let entries = leaderboard::compute(&pool).await?;

    let (jar, flash) = take_flash(jar);
    let page = LeaderboardPage {
        page: Page::new(Some(&claims), flash),
        entries,
    };
    Ok((jar, render(&page)?))
}
