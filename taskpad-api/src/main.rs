//! # Taskpad API Server
//!
//! Session-authenticated REST API for the Taskpad project/task tracker.
//!
//! ## Architecture
//!
//! The server is built with Axum and provides:
//! - Registration, login, logout, and session checks (cookie sessions
//!   backed by PostgreSQL, surviving restarts)
//! - Project CRUD with cascading task deletion
//! - Task CRUD with per-project bulk operations
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p taskpad-api
//! ```

use taskpad_api::{
    app::{build_router, AppState},
    config::Config,
};
use taskpad_shared::db::{migrations, pool};
use tower_sessions_sqlx_store::PostgresStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskpad_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Taskpad API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    // Load configuration
    let config = Config::from_env()?;

    // Initialize database pool and schema
    let db_config = pool::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    };
    let db = pool::create_pool(db_config).await?;
    migrations::run_migrations(&db).await?;

    // Session store lives in the same database, in its own table
    let session_store = PostgresStore::new(db.clone());
    session_store.migrate().await?;

    // Build the application
    let state = AppState::new(db.clone(), config.clone());
    let app = build_router(state, session_store);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown signal received, exiting...");
    pool::close_pool(db).await;

    Ok(())
}

/// Resolves when ctrl-c is received
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
