// src/views.rs

//! Askama templates for every page. Each page struct carries a `Page`
//! with the signed-in user and the pending flash message for the layout.

use askama::Template;
use axum::{http::StatusCode, response::Html};

use crate::{
    error::AppError,
    models::{
        leaderboard::LeaderboardEntry,
        prompt::{Prompt, PromptListItem, PromptSummary},
        response::{PromptResponseRow, StudentResponseRow},
        user::Role,
    },
    utils::{flash::Flash, jwt::Claims},
};

/// Who is signed in, as far as the layout cares.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub name: String,
    pub role: Role,
}

impl SessionUser {
    pub fn is_teacher(&self) -> bool {
        self.role == Role::Teacher
    }
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    pub user: Option<SessionUser>,
    pub flash: Option<Flash>,
}

impl Page {
    pub fn new(claims: Option<&Claims>, flash: Option<Flash>) -> Self {
        Self {
            user: claims.map(|c| SessionUser {
                name: c.name.clone(),
                role: c.role,
            }),
            flash,
        }
    }
}

pub fn render<T: Template>(template: &T) -> Result<Html<String>, AppError> {
    Ok(Html(template.render()?))
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub page: Page,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterPage {
    pub page: Page,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub page: Page,
}

#[derive(Template)]
#[template(path = "teacher_dashboard.html")]
pub struct TeacherDashboardPage {
    pub page: Page,
    pub prompts: Vec<PromptSummary>,
}

#[derive(Template)]
#[template(path = "create_prompt.html")]
pub struct CreatePromptPage {
    pub page: Page,
}

#[derive(Template)]
#[template(path = "grade_responses.html")]
pub struct GradeResponsesPage {
    pub page: Page,
    pub prompt: Prompt,
    pub responses: Vec<PromptResponseRow>,
}

#[derive(Template)]
#[template(path = "student_dashboard.html")]
pub struct StudentDashboardPage {
    pub page: Page,
    pub responses: Vec<StudentResponseRow>,
}

/// A prompt in the student's list, flagged if they already answered it.
#[derive(Debug, Clone)]
pub struct PromptChoice {
    pub prompt: PromptListItem,
    pub answered: bool,
}

#[derive(Template)]
#[template(path = "prompts.html")]
pub struct PromptsPage {
    pub page: Page,
    pub prompts: Vec<PromptChoice>,
}

#[derive(Template)]
#[template(path = "view_prompt.html")]
pub struct ViewPromptPage {
    pub page: Page,
    pub prompt: Prompt,
    pub existing: Option<StudentResponseRow>,
}

#[derive(Template)]
#[template(path = "leaderboard.html")]
pub struct LeaderboardPage {
    pub page: Page,
    pub entries: Vec<LeaderboardEntry>,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub page: Page,
    pub status: u16,
    pub reason: String,
    pub message: String,
}

impl ErrorPage {
    pub fn new(status: StatusCode, message: &str) -> Self {
        Self {
            page: Page::default(),
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Error").to_string(),
            message: message.to_string(),
        }
    }
}
