// src/error.rs

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use std::fmt;

use crate::views::ErrorPage;

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTML responses.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 400 Bad Request (form validation, out-of-range grade)
    BadRequest(String),

    // Not logged in or session invalid; redirected to the login page
    AuthError(String),

    // 403 Forbidden (wrong role, not the prompt's author)
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict (duplicate name, second response to a prompt)
    Conflict(String),
}

impl AppError {
    /// Errors the user can fix by editing the form they just submitted.
    pub fn is_form_error(&self) -> bool {
        matches!(self, AppError::BadRequest(_) | AppError::Conflict(_))
    }

    /// Message safe to show to the end user.
    pub fn user_message(&self) -> &str {
        match self {
            AppError::InternalServerError(_) => "Something went wrong on our side.",
            AppError::BadRequest(msg)
            | AppError::AuthError(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg) => msg,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Converts the error into a rendered HTML page with the matching status code.
/// Missing or invalid sessions become a redirect to the login form instead.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::AuthError(msg) => {
                tracing::debug!("Redirecting to login: {}", msg);
                return Redirect::to("/login").into_response();
            }
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden(msg) => {
                tracing::warn!("Forbidden: {}", msg);
                StatusCode::FORBIDDEN
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
        };

        let page = ErrorPage::new(status, self.user_message());
        match page.render() {
            Ok(body) => (status, Html(body)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render error page: {:?}", e);
                (status, self.user_message().to_string()).into_response()
            }
        }
    }
}

/// Converts `sqlx::Error` into `AppError::InternalServerError`.
/// Allows using `?` operator on database queries.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

impl From<askama::Error> for AppError {
    fn from(err: askama::Error) -> Self {
        AppError::InternalServerError(format!("template: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::BadRequest(first_validation_message(&errors))
    }
}

/// Picks the first human readable message out of a validation failure.
fn first_validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string())
}

/// Maps a unique-index violation to `Conflict`, everything else to a 500.
pub fn conflict_on_unique(err: sqlx::Error, message: impl Into<String>) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::Conflict(message.into())
        }
        _ => AppError::from(err),
    }
}
