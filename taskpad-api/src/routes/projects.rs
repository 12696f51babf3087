/// Project endpoints
///
/// CRUD over projects, plus the two bulk deletes. All of these sit behind
/// the session guard; any authenticated session may touch any project.
///
/// # Endpoints
///
/// - `POST /api/projects` - Create a project
/// - `GET /api/projects` - List all projects
/// - `GET /api/projects/:id` - Get one project with its tasks embedded
/// - `PUT /api/projects/:id` - Update title/description
/// - `DELETE /api/projects/:id` - Delete a project and its tasks
/// - `DELETE /api/projects` - Delete every project and every task

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use taskpad_shared::models::project::{
    CreateProject, Project, ProjectWithTasks, UpdateProject,
};

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::MessageResponse,
};

/// Create/update project request
#[derive(Debug, Deserialize, Validate)]
pub struct ProjectRequest {
    /// Project title (required)
    #[validate(length(min = 1, message = "Project title is required"))]
    pub title: String,

    /// Optional description; absent on update means "keep the current one"
    pub description: Option<String>,
}

/// Response carrying a single project
#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectResponse {
    /// Human-readable outcome
    pub message: String,

    /// The created or updated project
    pub project: Project,
}

/// Response for the project list
#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectListResponse {
    /// Every project, oldest first
    pub projects: Vec<Project>,
}

/// Response for a single project with its tasks embedded
#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectDetailResponse {
    /// The project, with `tasks` alongside its own fields
    pub project: ProjectWithTasks,
}

/// Create a project
///
/// # Errors
///
/// - `400 Bad Request`: missing title
/// - `500 Internal Server Error`: store failure
pub async fn create_project(
    State(state): State<AppState>,
    Json(req): Json<ProjectRequest>,
) -> ApiResult<Json<ProjectResponse>> {
    req.validate()?;

    let project = Project::create(
        &state.db,
        CreateProject {
            title: req.title,
            description: req.description,
        },
    )
    .await?;

    tracing::info!(project_id = %project.id, "Project created");

    Ok(Json(ProjectResponse {
        message: "Project created".to_string(),
        project,
    }))
}

/// List all projects
///
/// No filtering, no pagination.
pub async fn list_projects(
    State(state): State<AppState>,
) -> ApiResult<Json<ProjectListResponse>> {
    let projects = Project::list_all(&state.db).await?;

    Ok(Json(ProjectListResponse { projects }))
}

/// Get a project by ID, with every task referencing it embedded
///
/// # Errors
///
/// - `404 Not Found`: unknown project id
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ProjectDetailResponse>> {
    let project = Project::find_with_tasks(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(Json(ProjectDetailResponse { project }))
}

/// Update a project's title and description
///
/// # Errors
///
/// - `400 Bad Request`: missing title
/// - `404 Not Found`: unknown project id
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ProjectRequest>,
) -> ApiResult<Json<ProjectResponse>> {
    req.validate()?;

    let project = Project::update(
        &state.db,
        id,
        UpdateProject {
            title: req.title,
            description: req.description,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(Json(ProjectResponse {
        message: "Project updated".to_string(),
        project,
    }))
}

/// Delete a project and all of its tasks
///
/// Child tasks and the project go in one transaction; a partial delete is
/// never reported as success. Deleting an unknown id is a no-op success.
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    let deleted = Project::delete(&state.db, id).await?;

    if deleted {
        tracing::info!(project_id = %id, "Project and its tasks deleted");
    }

    Ok(Json(MessageResponse::new("Project and its tasks deleted")))
}

/// Delete every project and every task
///
/// Empty collections are a valid end state, so this always succeeds.
pub async fn delete_all_projects(
    State(state): State<AppState>,
) -> ApiResult<Json<MessageResponse>> {
    Project::delete_all(&state.db).await?;

    tracing::info!("All projects and tasks deleted");

    Ok(Json(MessageResponse::new("All projects and tasks deleted")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_request_requires_title() {
        let req = ProjectRequest {
            title: "".to_string(),
            description: None,
        };
        assert!(req.validate().is_err());

        let req = ProjectRequest {
            title: "Sprint 1".to_string(),
            description: Some("first sprint".to_string()),
        };
        assert!(req.validate().is_ok());
    }
}
