// src/db.rs

use std::{str::FromStr, time::Duration};

use sqlx::{
    SqlitePool,
    migrate::MigrateError,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
};

/// Opens the connection pool, creating the database file if needed.
/// Foreign keys are enforced on every connection.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let mut options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    let mut pool_options = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(3));

    if database_url.contains(":memory:") {
        // An in-memory database lives and dies with its connection.
        pool_options = pool_options.idle_timeout(None).max_lifetime(None);
    } else {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    pool_options.connect_with(options).await
}

/// Applies the embedded schema migrations.
pub async fn migrate(pool: &SqlitePool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
