/// Task endpoints
///
/// Task CRUD plus the per-project bulk operations. Tasks are only ever
/// created under an existing project; bulk operations 404 when the
/// project is unknown.
///
/// # Endpoints
///
/// - `POST /api/projects/:project_id/tasks` - Create a task under a project
/// - `GET /api/tasks/:id` - Get a task
/// - `PUT /api/tasks/:id` - Update title/status
/// - `DELETE /api/tasks/:id` - Delete a task
/// - `DELETE /api/projects/:project_id/tasks` - Delete a project's tasks
/// - `PUT /api/projects/:project_id/tasks/mark-all-done` - Set every task
///   of a project to "done"

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use taskpad_shared::models::project::Project;
use taskpad_shared::models::task::{CreateTask, Task, TaskStatus, UpdateTask};

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::MessageResponse,
};

/// Create/update task request
///
/// The status comes in as a string and is parsed against the three
/// canonical spellings; anything else is a 400, never stored verbatim.
#[derive(Debug, Deserialize, Validate)]
pub struct TaskRequest {
    /// Task title (required)
    #[validate(length(min = 1, message = "Task title is required"))]
    pub title: String,

    /// Status; on create, absent means "to do", on update, absent keeps
    /// the current value
    pub status: Option<String>,
}

impl TaskRequest {
    /// Parses the optional status field
    fn parsed_status(&self) -> Result<Option<TaskStatus>, ApiError> {
        self.status
            .as_deref()
            .map(|s| s.parse::<TaskStatus>())
            .transpose()
            .map_err(ApiError::from)
    }
}

/// Response carrying a single task plus a message
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskResponse {
    /// Human-readable outcome
    pub message: String,

    /// The created or updated task
    pub task: Task,
}

/// Response carrying just a task
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskDetailResponse {
    /// The task
    pub task: Task,
}

/// Create a task under a project
///
/// # Errors
///
/// - `400 Bad Request`: missing title or unrecognized status
/// - `404 Not Found`: unknown project id
pub async fn create_task(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Json(req): Json<TaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    req.validate()?;
    let status = req.parsed_status()?.unwrap_or_default();

    // No orphan creation: the project must exist first
    Project::find_by_id(&state.db, project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    let task = Task::create(
        &state.db,
        CreateTask {
            project_id,
            title: req.title,
            status,
        },
    )
    .await?;

    tracing::info!(task_id = %task.id, project_id = %project_id, "Task created");

    Ok((
        StatusCode::CREATED,
        Json(TaskResponse {
            message: "Task created".to_string(),
            task,
        }),
    ))
}

/// Get a task by ID
///
/// # Errors
///
/// - `404 Not Found`: unknown task id
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<TaskDetailResponse>> {
    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(TaskDetailResponse { task }))
}

/// Update a task's title and status
///
/// Status transitions are free in any direction; no state is terminal.
///
/// # Errors
///
/// - `400 Bad Request`: missing title or unrecognized status
/// - `404 Not Found`: unknown task id
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<TaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    req.validate()?;
    let status = req.parsed_status()?;

    let task = Task::update(
        &state.db,
        id,
        UpdateTask {
            title: req.title,
            status,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(TaskResponse {
        message: "Task updated".to_string(),
        task,
    }))
}

/// Delete a task by ID
///
/// Deleting an unknown id is a no-op success.
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    Task::delete(&state.db, id).await?;

    Ok(Json(MessageResponse::new("Task deleted")))
}

/// Delete every task belonging to a project
///
/// Zero matching tasks is success; an unknown project is not.
///
/// # Errors
///
/// - `404 Not Found`: unknown project id
pub async fn delete_project_tasks(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    let project = Project::find_by_id(&state.db, project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    let deleted = Task::delete_by_project(&state.db, project_id).await?;
    tracing::info!(project_id = %project_id, deleted, "Deleted all tasks for project");

    Ok(Json(MessageResponse::new(format!(
        "All tasks deleted for project {}",
        project.title
    ))))
}

/// Mark every task of a project as done
///
/// Forces the `done` status from any state; applying it twice yields the
/// same task set as once.
///
/// # Errors
///
/// - `404 Not Found`: unknown project id
pub async fn mark_all_tasks_done(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    let project = Project::find_by_id(&state.db, project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Task::mark_all_done(&state.db, project_id).await?;

    Ok(Json(MessageResponse::new(format!(
        "All tasks for project {} marked as done",
        project.title
    ))))
}
