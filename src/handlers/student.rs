// src/handlers/student.rs

use std::collections::HashSet;

use axum::{
    Extension, Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    handlers::form_failure,
    models::response::{SubmitResponseForm, SubmitResponseRequest},
    services::{prompts, responses},
    utils::{
        flash::{FlashLevel, set_flash, take_flash},
        jwt::Claims,
    },
    views::{Page, PromptChoice, PromptsPage, StudentDashboardPage, ViewPromptPage, render},
};

/// The student's submissions, newest first, with grades and feedback.
pub async fn dashboard(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let responses = responses::list_for_student(&pool, claims.user_id()?).await?;

    let (jar, flash) = take_flash(jar);
    let page = StudentDashboardPage {
        page: Page::new(Some(&claims), flash),
        responses,
    };
    Ok((jar, render(&page)?))
}

/// Every published prompt, marking the ones already answered.
pub async fn list_prompts(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let answered: HashSet<i64> = responses::list_for_student(&pool, claims.user_id()?)
        .await?
        .into_iter()
        .map(|r| r.prompt_id)
        .collect();

    let prompts = prompts::list(&pool)
        .await?
        .into_iter()
        .map(|prompt| PromptChoice {
            answered: answered.contains(&prompt.id),
            prompt,
        })
        .collect();

    let (jar, flash) = take_flash(jar);
    let page = PromptsPage {
        page: Page::new(Some(&claims), flash),
        prompts,
    };
    Ok((jar, render(&page)?))
}

/// Shows a prompt with either the answer form or the student's existing answer.
pub async fn view_prompt(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path(prompt_id): Path<i64>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let prompt = prompts::get(&pool, prompt_id).await?;
    let existing =
        responses::find_for_student_and_prompt(&pool, claims.user_id()?, prompt_id).await?;

    let (jar, flash) = take_flash(jar);
    let page = ViewPromptPage {
        page: Page::new(Some(&claims), flash),
        prompt,
        existing,
    };
    Ok((jar, render(&page)?))
}

/// Submits the student's one and only answer to a prompt.
pub async fn submit_response(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path(prompt_id): Path<i64>,
    jar: CookieJar,
    Form(form): Form<SubmitResponseForm>,
) -> Result<Response, AppError> {
    let back = format!("/prompt/{}", prompt_id);

    let req = SubmitResponseRequest::from(form);
    if let Err(e) = responses::submit(&pool, claims.user_id()?, prompt_id, &req).await {
        return form_failure(jar, e, &back);
    }

    let jar = set_flash(jar, FlashLevel::Success, "Response submitted.");
    Ok((jar, Redirect::to("/student/dashboard")).into_response())
}
