/// Application state and router builder
///
/// This module defines the shared application state and provides a
/// function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use taskpad_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
/// use tower_sessions_sqlx_store::PostgresStore;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let store = PostgresStore::new(pool.clone());
/// store.migrate().await?;
/// let state = AppState::new(pool, config);
/// let app = taskpad_api::app::build_router(state, store);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, middleware::cache::NoStoreLayer};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                                  # Health check (public)
/// └── /api/                                    # API (common prefix)
///     ├── POST   /register                     # public
///     ├── POST   /login                        # public
///     ├── GET    /logout                       # public (operates on the session)
///     ├── GET    /check-session                # public (reports the session)
///     ├── /projects ...                        # session-guarded
///     └── /tasks ...                           # session-guarded
/// ```
///
/// # Middleware Stack
///
/// Applied in order (innermost to outermost):
/// 1. Session management (tower-sessions over the Postgres store)
/// 2. Logging (tower-http TraceLayer)
/// 3. CORS (explicit origin list, credentials allowed)
/// 4. No-store cache headers
///
/// The session guard (`require_login`) is a per-group route layer on the
/// project/task routes only.
pub fn build_router(state: AppState, session_store: PostgresStore) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Session lifecycle routes (public: they create, inspect, or destroy
    // the session itself)
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/logout", get(routes::auth::logout))
        .route("/check-session", get(routes::auth::check_session));

    // Project and task routes (require an authenticated session)
    let tracker_routes = Router::new()
        .route(
            "/projects",
            post(routes::projects::create_project)
                .get(routes::projects::list_projects)
                .delete(routes::projects::delete_all_projects),
        )
        .route(
            "/projects/:id",
            get(routes::projects::get_project)
                .put(routes::projects::update_project)
                .delete(routes::projects::delete_project),
        )
        .route(
            "/projects/:id/tasks",
            post(routes::tasks::create_task).delete(routes::tasks::delete_project_tasks),
        )
        .route(
            "/projects/:id/tasks/mark-all-done",
            put(routes::tasks::mark_all_tasks_done),
        )
        .route(
            "/tasks/:id",
            get(routes::tasks::get_task)
                .put(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        )
        .layer(axum::middleware::from_fn(
            crate::middleware::auth::require_login,
        ));

    let api_routes = Router::new().merge(auth_routes).merge(tracker_routes);

    // Session cookie: HTTP-only, opaque id, Postgres-backed record that
    // survives restarts
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(state.config.session.cookie_secure)
        .with_expiry(Expiry::OnInactivity(time::Duration::days(
            state.config.session.inactivity_days,
        )));

    // Cookies cannot ride a wildcard origin, so the allow-list is always
    // explicit
    let origins: Vec<HeaderValue> = state
        .config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(session_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(NoStoreLayer::new())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    // Router construction is exercised end-to-end by the integration
    // tests in tests/, which need a live database for the session store.
}
