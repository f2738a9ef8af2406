/// Project endpoints
///
/// Ownership-scoped CRUD over projects. Every handler resolves the
/// caller from the session (via [`AuthContext`]) and only ever touches
/// rows owned by that user. A project id that exists but belongs to
/// someone else behaves exactly like an id that does not exist: 404.
///
/// # Endpoints
///
/// - `GET /api/projects` - List the caller's projects
/// - `POST /api/projects` - Create a project owned by the caller
/// - `GET /api/projects/:id` - Fetch one of the caller's projects
/// - `PUT /api/projects/:id` - Full-replace update
/// - `DELETE /api/projects/:id` - Delete (cascades to tasks)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::auth::MessageResponse,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use taskboard_shared::{
    auth::middleware::AuthContext,
    models::project::{CreateProject, Project, UpdateProject, DEFAULT_STATUS},
};
use validator::Validate;

/// Create project request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    /// Project name (required)
    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Optional status (defaults to "active")
    pub status: Option<String>,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,
}

/// Update project request
///
/// Updates are full replacements: an absent optional field clears the
/// column (description, due date) or resets it to its default (status).
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    /// New project name (required)
    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    /// New description (absent clears it)
    pub description: Option<String>,

    /// New status (absent resets to "active")
    pub status: Option<String>,

    /// New due date (absent clears it)
    pub due_date: Option<DateTime<Utc>>,
}

/// List the caller's projects
///
/// # Endpoint
///
/// ```text
/// GET /api/projects
/// ```
///
/// Returns the caller's projects only, oldest first. Never includes
/// another user's rows.
pub async fn list_projects(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<Project>>> {
    let projects = Project::list_by_owner(&state.db, auth.user_id).await?;
    Ok(Json(projects))
}

/// Create a project owned by the caller
///
/// The owner is always the authenticated user; a client cannot create a
/// project for someone else.
///
/// # Endpoint
///
/// ```text
/// POST /api/projects
/// Content-Type: application/json
///
/// {
///   "name": "Website Redesign",
///   "description": "Revamp the company site",
///   "dueDate": "2026-10-01T00:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing name
/// - `401 Unauthorized`: No valid session
pub async fn create_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateProjectRequest>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    req.validate()?;

    let project = Project::create(
        &state.db,
        CreateProject {
            name: req.name,
            description: req.description,
            status: req.status,
            due_date: req.due_date,
            user_id: auth.user_id,
        },
    )
    .await?;

    tracing::info!(user_id = auth.user_id, project_id = project.id, "Project created");

    Ok((StatusCode::CREATED, Json(project)))
}

/// Fetch a single project by id
///
/// # Errors
///
/// - `401 Unauthorized`: No valid session
/// - `404 Not Found`: No such project under the caller's ownership
pub async fn get_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Project>> {
    let project = Project::find_by_id_and_owner(&state.db, id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(Json(project))
}

/// Full-replace update of a project
///
/// # Errors
///
/// - `400 Bad Request`: Missing name
/// - `401 Unauthorized`: No valid session
/// - `404 Not Found`: No such project under the caller's ownership
pub async fn update_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateProjectRequest>,
) -> ApiResult<Json<Project>> {
    req.validate()?;

    let project = Project::update_for_owner(
        &state.db,
        id,
        auth.user_id,
        UpdateProject {
            name: req.name,
            description: req.description,
            status: req.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            due_date: req.due_date,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    tracing::info!(user_id = auth.user_id, project_id = project.id, "Project updated");

    Ok(Json(project))
}

/// Delete a project
///
/// Deleting a project also deletes all of its tasks via the foreign-key
/// cascade.
///
/// # Errors
///
/// - `401 Unauthorized`: No valid session
/// - `404 Not Found`: No such project under the caller's ownership
pub async fn delete_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let deleted = Project::delete_for_owner(&state.db, id, auth.user_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Project not found".to_string()));
    }

    tracing::info!(user_id = auth.user_id, project_id = id, "Project deleted");

    Ok(Json(MessageResponse {
        message: "Project deleted successfully".to_string(),
    }))
}
