/// Task model and database operations
///
/// Tasks belong to exactly one project and carry a three-state status.
///
/// # State Machine
///
/// ```text
/// to do ⇄ in progress ⇄ done
/// ```
///
/// Free transitions in any direction via update; `mark_all_done` forces
/// every task of a project into `done` from any state. No state is
/// terminal.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('to do', 'in progress', 'done');
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     project_id UUID NOT NULL REFERENCES projects(id),
///     title VARCHAR(255) NOT NULL,
///     status task_status NOT NULL DEFAULT 'to do',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::str::FromStr;
use uuid::Uuid;

/// Task status
///
/// Stored as the `task_status` PostgreSQL enum; the lowercase spellings
/// below are the only representable values, on the wire and at rest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status")]
pub enum TaskStatus {
    /// Not started yet (the default for new tasks)
    #[default]
    #[sqlx(rename = "to do")]
    #[serde(rename = "to do")]
    ToDo,

    /// Being worked on
    #[sqlx(rename = "in progress")]
    #[serde(rename = "in progress")]
    InProgress,

    /// Finished
    #[sqlx(rename = "done")]
    #[serde(rename = "done")]
    Done,
}

/// Error for an unrecognized task status string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized task status: {0:?} (expected \"to do\", \"in progress\" or \"done\")")]
pub struct InvalidTaskStatus(pub String);

impl TaskStatus {
    /// Returns the canonical string form
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::ToDo => "to do",
            TaskStatus::InProgress => "in progress",
            TaskStatus::Done => "done",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = InvalidTaskStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "to do" => Ok(TaskStatus::ToDo),
            "in progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            other => Err(InvalidTaskStatus(other.to_string())),
        }
    }
}

/// Task model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID (UUID v4)
    pub id: Uuid,

    /// Project this task belongs to
    pub project_id: Uuid,

    /// Task title
    pub title: String,

    /// Current status
    pub status: TaskStatus,

    /// When the task was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Project the task belongs to (must exist)
    pub project_id: Uuid,

    /// Task title (required)
    pub title: String,

    /// Initial status
    pub status: TaskStatus,
}

/// Input for updating a task
///
/// An absent status leaves the stored value unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTask {
    /// New title (required)
    pub title: String,

    /// New status, or None to keep the current one
    pub status: Option<TaskStatus>,
}

impl Task {
    /// Creates a new task under an existing project
    ///
    /// The caller is responsible for checking that the project exists;
    /// the foreign key rejects orphan creation either way.
    ///
    /// # Errors
    ///
    /// Returns an error if the project id violates the foreign key or the
    /// database write fails
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (project_id, title, status)
            VALUES ($1, $2, $3)
            RETURNING id, project_id, title, status, created_at
            "#,
        )
        .bind(data.project_id)
        .bind(data.title)
        .bind(data.status)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    ///
    /// # Returns
    ///
    /// The task if found, None otherwise
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, project_id, title, status, created_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists every task belonging to a project, oldest first
    pub async fn list_by_project(pool: &PgPool, project_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, project_id, title, status, created_at
            FROM tasks
            WHERE project_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(project_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Updates a task's title and, when provided, status
    ///
    /// An absent status keeps the stored value.
    ///
    /// # Returns
    ///
    /// The updated task if found, None if the task doesn't exist
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = $2, status = COALESCE($3, status)
            WHERE id = $1
            RETURNING id, project_id, title, status, created_at
            "#,
        )
        .bind(id)
        .bind(data.title)
        .bind(data.status)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task by ID
    ///
    /// # Returns
    ///
    /// True if the task existed and was deleted, false otherwise
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes every task belonging to a project
    ///
    /// Zero matches is success.
    ///
    /// # Returns
    ///
    /// The number of tasks deleted
    pub async fn delete_by_project(pool: &PgPool, project_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE project_id = $1")
            .bind(project_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Marks every task of a project as done, regardless of current status
    ///
    /// Idempotent: applying it twice yields the same task set as once.
    ///
    /// # Returns
    ///
    /// The number of tasks updated
    pub async fn mark_all_done(pool: &PgPool, project_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE tasks SET status = $2 WHERE project_id = $1")
            .bind(project_id)
            .bind(TaskStatus::Done)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_default_is_to_do() {
        assert_eq!(TaskStatus::default(), TaskStatus::ToDo);
        assert_eq!(TaskStatus::default().as_str(), "to do");
    }

    #[test]
    fn test_status_round_trip() {
        for status in [TaskStatus::ToDo, TaskStatus::InProgress, TaskStatus::Done] {
            assert_eq!(status.as_str().parse::<TaskStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_status_rejects_unrecognized_values() {
        assert!("ToDo".parse::<TaskStatus>().is_err());
        assert!("TO DO".parse::<TaskStatus>().is_err());
        assert!("doing".parse::<TaskStatus>().is_err());
        assert!("".parse::<TaskStatus>().is_err());

        let err = "ToDo".parse::<TaskStatus>().unwrap_err();
        assert!(err.to_string().contains("ToDo"));
    }

    #[test]
    fn test_status_serde_uses_lowercase_spellings() {
        assert_eq!(
            serde_json::to_value(TaskStatus::InProgress).unwrap(),
            serde_json::json!("in progress")
        );
        assert_eq!(
            serde_json::from_value::<TaskStatus>(serde_json::json!("done")).unwrap(),
            TaskStatus::Done
        );
        assert!(serde_json::from_value::<TaskStatus>(serde_json::json!("ToDo")).is_err());
    }

    // Integration tests for database operations are in taskpad-api/tests/
}
