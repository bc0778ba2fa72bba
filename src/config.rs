// src/config.rs

use std::env;

/// Signing key used when `SECRET_KEY` is not set. Only fit for local development.
pub const DEV_SECRET_KEY: &str = "dev-key-please-change-in-production";

/// Local file-backed database used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://newel.db?mode=rwc";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub secret_key: String,
    /// Session lifetime in seconds.
    pub session_ttl: u64,
    pub cookie_secure: bool,
    pub bind_addr: String,
    pub rust_log: String,
    pub seed_teacher_name: Option<String>,
    pub seed_teacher_password: Option<String>,
}

impl Config {
    /// Reads settings from the process environment. `.env` is loaded by `main`.
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let secret_key = env::var("SECRET_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .unwrap_or_else(|| DEV_SECRET_KEY.to_string());

        let session_ttl = env::var("SESSION_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(86_400);

        let cookie_secure = env::var("COOKIE_SECURE")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        Self {
            database_url,
            secret_key,
            session_ttl,
            cookie_secure,
            bind_addr,
            rust_log,
            seed_teacher_name: env::var("SEED_TEACHER_NAME").ok(),
            seed_teacher_password: env::var("SEED_TEACHER_PASSWORD").ok(),
        }
    }

    pub fn uses_dev_secret(&self) -> bool {
        self.secret_key == DEV_SECRET_KEY
    }
}
