// src/handlers/teacher.rs

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
    models::{
        grade::{GradeForm, GradeOutcome, GradeRequest},
        prompt::{CreatePromptRequest, PromptForm},
    },
    services::{grades, prompts, responses},
    utils::{
        flash::{FlashLevel, set_flash, take_flash},
        jwt::Claims,
    },
    views::{CreatePromptPage, GradeResponsesPage, Page, TeacherDashboardPage, render},
};

/// The teacher's own prompts with how many responses still need grading.
pub async fn dashboard(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let prompts = prompts::list_for_teacher(&pool, claims.user_id()?).await?;

    let (jar, flash) = take_flash(jar);
    let page = TeacherDashboardPage {
        page: Page::new(Some(&claims), flash),
        prompts,
    };
    Ok((jar, render(&page)?))
}

pub async fn create_prompt_page(
    Extension(claims): Extension<Claims>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let (jar, flash) = take_flash(jar);
    let page = CreatePromptPage {
        page: Page::new(Some(&claims), flash),
    };
    Ok((jar, render(&page)?))
}

pub async fn create_prompt(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    jar: CookieJar,
    Form(form): Form<PromptForm>,
) -> Result<Response, AppError> {
    let req = CreatePromptRequest::from(form);

    if let Err(e) = prompts::create(&pool, claims.user_id()?, &req).await {
        return form_failure(jar, e, "/create_prompt");
    }

    let jar = set_flash(jar, FlashLevel::Success, "Prompt created successfully.");
    Ok((jar, Redirect::to("/teacher/dashboard")).into_response())
}

/// Lists every response to one of the teacher's prompts with a grading form each.
/// Other teachers' prompts are off limits.
pub async fn grade_responses(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path(prompt_id): Path<i64>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let prompt = prompts::get(&pool, prompt_id).await?;

    if prompt.teacher_id != claims.user_id()? {
        return Err(AppError::Forbidden(
            "You are not authorized to grade responses for that prompt.".to_string(),
        ));
    }

    let responses = responses::list_for_prompt(&pool, prompt_id).await?;

    let (jar, flash) = take_flash(jar);
    let page = GradeResponsesPage {
        page: Page::new(Some(&claims), flash),
        prompt,
        responses,
    };
    Ok((jar, render(&page)?))
}

/// Creates or replaces the grade on a response.
/// A bad score is reported on the grading page and writes nothing.
pub async fn grade_response(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path(response_id): Path<i64>,
    jar: CookieJar,
    Form(form): Form<GradeForm>,
) -> Result<Response, AppError> {
    let response = responses::get(&pool, response_id).await?;
    let back = format!("/grade/{}", response.prompt_id);

    let req = match GradeRequest::parse(form) {
        Ok(req) => req,
        Err(e) => return form_failure(jar, e, &back),
    };

    let outcome = match grades::grade(&pool, response_id, claims.user_id()?, &req).await {
        Ok((_, outcome)) => outcome,
        Err(e) => return form_failure(jar, e, &back),
    };

    let message = match outcome {
        GradeOutcome::Created => "Grade saved.",
        GradeOutcome::Updated => "Grade updated.",
    };
    let jar = set_flash(jar, FlashLevel::Success, message);
    Ok((jar, Redirect::to(&back)).into_response())
}
