/// Project model and database operations
///
/// Projects group tasks. There is no owner column: any authenticated
/// session may read or mutate any project.
///
/// Deleting a project deletes its tasks first, inside the same
/// transaction, so no orphan task can survive a completed delete.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE projects (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::task::Task;

/// Project model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    /// Unique project ID (UUID v4)
    pub id: Uuid,

    /// Project title
    pub title: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// When the project was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    /// Project title (required)
    pub title: String,

    /// Optional description
    pub description: Option<String>,
}

/// Input for updating an existing project
///
/// An absent description leaves the stored value unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProject {
    /// New title (required)
    pub title: String,

    /// New description, or None to keep the current one
    pub description: Option<String>,
}

/// A project together with every task that references it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectWithTasks {
    /// The project itself, flattened into the top-level object
    #[serde(flatten)]
    pub project: Project,

    /// All tasks whose project_id is this project
    pub tasks: Vec<Task>,
}

impl Project {
    /// Creates a new project
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails
    pub async fn create(pool: &PgPool, data: CreateProject) -> Result<Self, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (title, description)
            VALUES ($1, $2)
            RETURNING id, title, description, created_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .fetch_one(pool)
        .await?;

        Ok(project)
    }

    /// Finds a project by ID
    ///
    /// # Returns
    ///
    /// The project if found, None otherwise
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, title, description, created_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Finds a project by ID together with its tasks
    ///
    /// # Returns
    ///
    /// The project with every task referencing it, None if the project
    /// doesn't exist. A project with no tasks yields an empty `tasks` list.
    pub async fn find_with_tasks(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<Option<ProjectWithTasks>, sqlx::Error> {
        let Some(project) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let tasks = Task::list_by_project(pool, id).await?;

        Ok(Some(ProjectWithTasks { project, tasks }))
    }

    /// Lists all projects, oldest first
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, title, description, created_at
            FROM projects
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(projects)
    }

    /// Updates a project's title and, when provided, description
    ///
    /// An absent description keeps the stored value.
    ///
    /// # Returns
    ///
    /// The updated project if found, None if the project doesn't exist
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateProject,
    ) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET title = $2, description = COALESCE($3, description)
            WHERE id = $1
            RETURNING id, title, description, created_at
            "#,
        )
        .bind(id)
        .bind(data.title)
        .bind(data.description)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Deletes a project and all of its tasks
    ///
    /// Both deletes run in one transaction: either the tasks and the
    /// project are gone together, or neither is.
    ///
    /// # Returns
    ///
    /// True if the project existed and was deleted, false if there was
    /// nothing to delete
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM tasks WHERE project_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes every project and every task
    ///
    /// Empty collections are a valid end state, so this always succeeds.
    pub async fn delete_all(pool: &PgPool) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM tasks").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM projects").execute(&mut *tx).await?;

        tx.commit().await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::task::TaskStatus;

    #[test]
    fn test_project_with_tasks_flattens() {
        let project = Project {
            id: Uuid::new_v4(),
            title: "Sprint 1".to_string(),
            description: None,
            created_at: Utc::now(),
        };

        let with_tasks = ProjectWithTasks {
            project: project.clone(),
            tasks: vec![Task {
                id: Uuid::new_v4(),
                project_id: project.id,
                title: "Write spec".to_string(),
                status: TaskStatus::ToDo,
                created_at: Utc::now(),
            }],
        };

        let json = serde_json::to_value(&with_tasks).unwrap();
        // Flattened: project fields at the top level, tasks alongside
        assert_eq!(json["title"], "Sprint 1");
        assert_eq!(json["tasks"][0]["title"], "Write spec");
        assert_eq!(json["tasks"][0]["status"], "to do");
    }

    // Integration tests for database operations are in taskpad-api/tests/
}
