// tests/common/mod.rs

#![allow(dead_code)]

use newel::{
    config::Config,
    db,
    models::{
        grade::GradeRequest,
        prompt::CreatePromptRequest,
        response::SubmitResponseRequest,
        user::{CreateUserRequest, Role, User},
    },
    routes,
    services::users,
    state::AppState,
};
use sqlx::SqlitePool;
use std::{
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

/// Fresh in-memory database with the schema applied.
pub async fn test_pool() -> SqlitePool {
    let pool = db::connect("sqlite::memory:", 1)
        .await
        .expect("Failed to open in-memory database");
    db::migrate(&pool).await.expect("Failed to migrate database");
    pool
}

/// Database file on disk with a multi-connection pool, for tests that need
/// real write contention. Remove it with `drop_file_pool`.
pub async fn file_pool(tag: &str) -> (SqlitePool, PathBuf) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    let path = std::env::temp_dir().join(format!(
        "newel-{tag}-{}-{nanos}.db",
        std::process::id()
    ));
    let url = format!("sqlite://{}?mode=rwc", path.display());

    let pool = db::connect(&url, 5)
        .await
        .expect("Failed to open database file");
    db::migrate(&pool).await.expect("Failed to migrate database");
    (pool, path)
}

pub async fn drop_file_pool(pool: SqlitePool, path: PathBuf) {
    pool.close().await;
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        secret_key: "test_secret_for_integration_tests".to_string(),
        session_ttl: 600, // 10 minutes for tests
        cookie_secure: false,
        bind_addr: "127.0.0.1:0".to_string(),
        rust_log: "error".to_string(),
        seed_teacher_name: None,
        seed_teacher_password: None,
    }
}

pub struct TestApp {
    pub address: String,
    pub pool: SqlitePool,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}

/// Spawns the app on a random port for testing.
pub async fn spawn_app() -> TestApp {
    let pool = test_pool().await;
    let state = AppState {
        pool: pool.clone(),
        config: test_config(),
    };
    let app = routes::create_router(state);

    // Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        pool,
    }
}

/// Client that keeps the session cookie between requests, like a browser.
pub fn browser() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to build client")
}

/// Client that reports redirects instead of following them.
pub fn no_redirect_browser() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to build client")
}

pub async fn register(
    app: &TestApp,
    client: &reqwest::Client,
    name: &str,
    user_type: &str,
    year_level: &str,
) -> reqwest::Response {
    client
        .post(app.url("/register"))
        .form(&[
            ("name", name),
            ("password", "password123"),
            ("user_type", user_type),
            ("year_level", year_level),
        ])
        .send()
        .await
        .expect("Register request failed")
}

pub async fn login(app: &TestApp, client: &reqwest::Client, name: &str) -> reqwest::Response {
    client
        .post(app.url("/login"))
        .form(&[("name", name), ("password", "password123")])
        .send()
        .await
        .expect("Login request failed")
}

/// Registers and logs in a user on `client`.
pub async fn sign_in_as(app: &TestApp, client: &reqwest::Client, name: &str, user_type: &str) {
    let year = if user_type == "Student" { "10" } else { "" };
    register(app, client, name, user_type, year).await;
    let resp = login(app, client, name).await;
    assert_eq!(resp.status().as_u16(), 200, "login for {name} should land on a dashboard");
}

pub async fn create_user(pool: &SqlitePool, name: &str, role: Role) -> User {
    users::create(
        pool,
        &CreateUserRequest {
            name: name.to_string(),
            password: "password123".to_string(),
            role,
            year_level: match role {
                Role::Student => Some(10),
                Role::Teacher => None,
            },
        },
    )
    .await
    .expect("Failed to create user")
}

pub fn prompt_request(title: &str) -> CreatePromptRequest {
    CreatePromptRequest {
        title: title.to_string(),
        content: format!("{title}: write a paragraph."),
        subject: "Science".to_string(),
    }
}

pub fn grade_request(score: i64, feedback: &str) -> GradeRequest {
    GradeRequest {
        score,
        feedback: feedback.to_string(),
    }
}

pub fn answer(content: impl Into<String>) -> SubmitResponseRequest {
    SubmitResponseRequest {
        content: content.into(),
    }
}
