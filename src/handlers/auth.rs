// src/handlers/auth.rs

use axum::{
    Extension, Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use sqlx::SqlitePool;

use crate::{
    config::Config,
    error::AppError,
    handlers::form_failure,
    models::user::{CreateUserRequest, LoginForm, RegisterForm},
    services::users,
    utils::{
        flash::{FlashLevel, set_flash, take_flash},
        jwt::{Claims, clear_session, current_claims, session_cookie, sign_jwt},
    },
    views::{IndexPage, LoginPage, Page, RegisterPage, render},
};

/// Landing page. Signed-in users go straight to their dashboard.
pub async fn index(State(config): State<Config>, jar: CookieJar) -> Result<Response, AppError> {
    if let Some(claims) = current_claims(&jar, &config) {
        return Ok(Redirect::to(claims.role.dashboard_path()).into_response());
    }

    let (jar, flash) = take_flash(jar);
    let page = IndexPage {
        page: Page::new(None, flash),
    };
    Ok((jar, render(&page)?).into_response())
}

pub async fn register_page(jar: CookieJar) -> Result<impl IntoResponse, AppError> {
    let (jar, flash) = take_flash(jar);
    let page = RegisterPage {
        page: Page::new(None, flash),
    };
    Ok((jar, render(&page)?))
}

/// Registers a new user and sends them to the login form.
///
/// Missing fields, bad lengths and taken names come back as a flash on the form.
pub async fn register(
    State(pool): State<SqlitePool>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    let created = match CreateUserRequest::try_from(form) {
        Ok(req) => users::create(&pool, &req).await,
        Err(e) => Err(e),
    };

    if let Err(e) = created {
        return form_failure(jar, e, "/register");
    }

    let jar = set_flash(jar, FlashLevel::Success, "Registration successful. Please log in.");
    Ok((jar, Redirect::to("/login")).into_response())
}

pub async fn login_page(
    State(config): State<Config>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let claims = current_claims(&jar, &config);
    let (jar, flash) = take_flash(jar);
    let page = LoginPage {
        page: Page::new(claims.as_ref(), flash),
    };
    Ok((jar, render(&page)?))
}

/// Verifies credentials and opens a session cookie.
pub async fn login(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let user = match users::authenticate(&pool, &form.name, &form.password).await {
        Ok(user) => user,
        Err(e) => return form_failure(jar, e, "/login"),
    };

    let token = sign_jwt(
        user.id,
        &user.name,
        user.role,
        &config.secret_key,
        config.session_ttl,
    )?;

    tracing::info!(user_id = user.id, "User logged in");

    let jar = jar.add(session_cookie(token, &config));
    let jar = set_flash(jar, FlashLevel::Success, "Logged in successfully.");
    Ok((jar, Redirect::to(user.role.dashboard_path())).into_response())
}

pub async fn logout(
    Extension(claims): Extension<Claims>,
    jar: CookieJar,
) -> impl IntoResponse {
    tracing::info!(user = %claims.name, "User logged out");
    let jar = set_flash(clear_session(jar), FlashLevel::Info, "Logged out.");
    (jar, Redirect::to("/"))
}
