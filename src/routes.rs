// src/routes.rs

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    handlers::{auth, leaderboard, student, teacher},
    state::AppState,
    utils::jwt::{auth_middleware, student_middleware, teacher_middleware},
};

/// Assembles the main application router.
///
/// * Public pages: landing, register, login, stylesheet.
/// * Every other page needs a session; teacher and student pages also check the role.
/// * Applies request tracing globally.
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(auth::index))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/login", get(auth::login_page).post(auth::login));

    let teacher_routes = Router::new()
        .route("/teacher/dashboard", get(teacher::dashboard))
        .route(
            "/create_prompt",
            get(teacher::create_prompt_page).post(teacher::create_prompt),
        )
        .route("/grade/{prompt_id}", get(teacher::grade_responses))
        .route("/grade_response/{response_id}", post(teacher::grade_response))
        .layer(middleware::from_fn(teacher_middleware));

    let student_routes = Router::new()
        .route("/student/dashboard", get(student::dashboard))
        .route("/prompts", get(student::list_prompts))
        .route(
            "/prompt/{prompt_id}",
            get(student::view_prompt).post(student::submit_response),
        )
        .layer(middleware::from_fn(student_middleware));

    // Double middleware protection: session first, then the role check inside each group
    let member_routes = Router::new()
        .route("/logout", get(auth::logout))
        .route("/leaderboard", get(leaderboard::show))
        .merge(teacher_routes)
        .merge(student_routes)
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(member_routes)
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
