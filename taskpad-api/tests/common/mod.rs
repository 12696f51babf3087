/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Test database setup (migrations + session store)
/// - A request helper that drives the real router and round-trips the
///   session cookie
/// - Test user registration and cleanup
///
/// Tests need a running PostgreSQL instance and a `DATABASE_URL`
/// environment variable (a `.env` file works).

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use sqlx::PgPool;
use std::sync::Mutex;
use tower::Service as _;
use tower_sessions_sqlx_store::PostgresStore;
use uuid::Uuid;

use taskpad_api::app::{build_router, AppState};
use taskpad_api::config::Config;
use taskpad_shared::db::migrations;
use taskpad_shared::models::project::Project;

/// Test context containing the app and bookkeeping for cleanup
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    usernames: Mutex<Vec<String>>,
    project_ids: Mutex<Vec<Uuid>>,
}

impl TestContext {
    /// Creates a new test context against the configured database
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config::from_env()?;

        let db = PgPool::connect(&config.database.url).await?;
        migrations::run_migrations(&db).await?;

        let session_store = PostgresStore::new(db.clone());
        session_store.migrate().await?;

        let state = AppState::new(db.clone(), config);
        let app = build_router(state, session_store);

        Ok(Self {
            db,
            app,
            usernames: Mutex::new(Vec::new()),
            project_ids: Mutex::new(Vec::new()),
        })
    }

    /// Sends a request to the router
    ///
    /// Returns the status, the parsed JSON body (Null when empty), and
    /// the session cookie from Set-Cookie if the response carried one.
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        cookie: Option<&str>,
    ) -> (StatusCode, Value, Option<String>) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().call(request).await.unwrap();

        let status = response.status();

        // Keep only the name=value pair; attributes don't matter for replay
        let session_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.split(';').next().unwrap_or(s).to_string());

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, body, session_cookie)
    }

    /// Registers a fresh user and returns (username, session cookie)
    ///
    /// The username is unique per call so concurrently running tests
    /// never collide.
    pub async fn register(&self, prefix: &str) -> anyhow::Result<(String, String)> {
        let username = format!("it-{}-{}", prefix, Uuid::new_v4());

        let (status, body, cookie) = self
            .send(
                "POST",
                "/api/register",
                Some(json!({ "username": username, "password": "correct horse" })),
                None,
            )
            .await;

        anyhow::ensure!(
            status == StatusCode::OK,
            "register failed: {} {}",
            status,
            body
        );
        let cookie =
            cookie.ok_or_else(|| anyhow::anyhow!("register response carried no session cookie"))?;

        self.usernames.lock().unwrap().push(username.clone());

        Ok((username, cookie))
    }

    /// Creates a project through the API and returns its id
    pub async fn create_project(&self, cookie: &str, title: &str) -> anyhow::Result<Uuid> {
        let (status, body, _) = self
            .send(
                "POST",
                "/api/projects",
                Some(json!({ "title": title })),
                Some(cookie),
            )
            .await;

        anyhow::ensure!(
            status == StatusCode::OK,
            "create project failed: {} {}",
            status,
            body
        );

        let id: Uuid = body["project"]["id"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("project id missing in {}", body))?
            .parse()?;

        self.track_project(id);

        Ok(id)
    }

    /// Creates a task under a project through the API and returns its id
    pub async fn create_task(
        &self,
        cookie: &str,
        project_id: Uuid,
        title: &str,
        status: Option<&str>,
    ) -> anyhow::Result<Uuid> {
        let mut body = json!({ "title": title });
        if let Some(status) = status {
            body["status"] = json!(status);
        }

        let (http_status, body, _) = self
            .send(
                "POST",
                &format!("/api/projects/{}/tasks", project_id),
                Some(body),
                Some(cookie),
            )
            .await;

        anyhow::ensure!(
            http_status == StatusCode::CREATED,
            "create task failed: {} {}",
            http_status,
            body
        );

        let id: Uuid = body["task"]["id"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("task id missing in {}", body))?
            .parse()?;

        Ok(id)
    }

    /// Remembers a project for cleanup (for projects created via raw
    /// `send` calls)
    pub fn track_project(&self, id: Uuid) {
        self.project_ids.lock().unwrap().push(id);
    }

    /// Removes everything this context created
    pub async fn cleanup(&self) -> anyhow::Result<()> {
        let project_ids: Vec<Uuid> = self.project_ids.lock().unwrap().drain(..).collect();
        for id in project_ids {
            // Cascades to the project's tasks; unknown ids are a no-op
            Project::delete(&self.db, id).await?;
        }

        let usernames: Vec<String> = self.usernames.lock().unwrap().drain(..).collect();
        for username in usernames {
            sqlx::query("DELETE FROM users WHERE username = $1")
                .bind(&username)
                .execute(&self.db)
                .await?;
        }

        Ok(())
    }
}
