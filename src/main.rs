// src/main.rs

use newel::config::Config;
use newel::routes;
use newel::services::users;
use newel::state::AppState;
use newel::db;
use dotenvy::dotenv;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    if config.uses_dev_secret() {
        tracing::warn!("SECRET_KEY is not set; using the development key. Do not run this in production.");
    }

    let pool = db::connect(&config.database_url, 5).await?;
    tracing::info!("Database connected...");

    // Run Migrations Automatically
    tracing::info!("Running migrations...");
    db::migrate(&pool).await?;
    tracing::info!("Migrations applied successfully.");

    // Seed Teacher User
    if let (Some(name), Some(password)) = (&config.seed_teacher_name, &config.seed_teacher_password) {
        if let Err(e) = users::seed_teacher(&pool, name, password).await {
            tracing::error!("Failed to seed teacher account: {:?}", e);
        }
    }

    let bind_addr = config.bind_addr.clone();
    let state = AppState { pool, config };

    // Create the Axum application router
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    // Start the server
    axum::serve(listener, app).await?;
    Ok(())
}
