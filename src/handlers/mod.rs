// src/handlers/mod.rs

pub mod auth;
pub mod leaderboard;
pub mod student;
pub mod teacher;

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    error::AppError,
    utils::flash::{FlashLevel, set_flash},
};

/// Sends form errors back to the form as a flash; anything else propagates.
pub(crate) fn form_failure(jar: CookieJar, err: AppError, back: &str) -> Result<Response, AppError> {
    if !err.is_form_error() {
        return Err(err);
    }
    tracing::debug!("Form rejected: {}", err.user_message());
    let jar = set_flash(jar, FlashLevel::Error, err.user_message());
    Ok((jar, Redirect::to(back)).into_response())
}
