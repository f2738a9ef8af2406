/// Task endpoints
///
/// Task access is always scoped through project ownership: a task is
/// visible or mutable only if its parent project belongs to the caller.
/// There is no direct task-level ownership column.
///
/// Creating a task under a project the caller does not own is the one
/// place the API answers 403 instead of 404: the client named a parent
/// it cannot use, and the response says so without confirming whether
/// that project exists at all (both unknown and unowned ids get the
/// same message).
///
/// # Endpoints
///
/// - `GET /api/tasks` - List all tasks across the caller's projects
/// - `POST /api/tasks` - Create a task under one of the caller's projects
/// - `GET /api/tasks/:id` - Fetch a single task
/// - `PUT /api/tasks/:id` - Full-replace update
/// - `DELETE /api/tasks/:id` - Delete

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
    models::{
        project::Project,
        task::{CreateTask, Task, UpdateTask, DEFAULT_PRIORITY},
    },
};
use validator::Validate;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Task title (required)
    #[serde(default)]
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Optional completion flag (defaults to false)
    pub completed: Option<bool>,

    /// Optional priority (defaults to "medium")
    pub priority: Option<String>,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,

    /// Parent project (required; must belong to the caller)
    pub project_id: Option<i64>,
}

/// Update task request
///
/// Updates are full replacements: an absent optional field clears the
/// column (description, due date) or resets it to its default
/// (completed=false, priority="medium"). The parent project cannot be
/// changed.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    /// New task title (required)
    #[serde(default)]
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    /// New description (absent clears it)
    pub description: Option<String>,

    /// New completion flag (absent resets to false)
    pub completed: Option<bool>,

    /// New priority (absent resets to "medium")
    pub priority: Option<String>,

    /// New due date (absent clears it)
    pub due_date: Option<DateTime<Utc>>,
}

/// List all tasks across the caller's projects
///
/// # Endpoint
///
/// ```text
/// GET /api/tasks
/// ```
///
/// Returns tasks from every project the caller owns, oldest first.
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = Task::list_by_owner(&state.db, auth.user_id).await?;
    Ok(Json(tasks))
}

/// Create a task under one of the caller's projects
///
/// # Endpoint
///
/// ```text
/// POST /api/tasks
/// Content-Type: application/json
///
/// {
///   "title": "Create wireframes",
///   "priority": "high",
///   "projectId": 1
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing title or projectId
/// - `401 Unauthorized`: No valid session
/// - `403 Forbidden`: Project is not the caller's (or does not exist)
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    req.validate()?;

    let project_id = req.project_id.ok_or_else(|| {
        ApiError::Validation(vec![crate::error::ValidationErrorDetail {
            field: "projectId".to_string(),
            message: "Project ID is required".to_string(),
        }])
    })?;

    // Same response for "not yours" and "does not exist"
    let project = Project::find_by_id_and_owner(&state.db, project_id, auth.user_id).await?;
    if project.is_none() {
        return Err(ApiError::Forbidden(
            "Cannot add task to a project you do not own".to_string(),
        ));
    }

    let task = Task::create(
        &state.db,
        CreateTask {
            title: req.title,
            description: req.description,
            completed: req.completed,
            priority: req.priority,
            due_date: req.due_date,
            project_id,
        },
    )
    .await?;

    tracing::info!(user_id = auth.user_id, task_id = task.id, "Task created");

    Ok((StatusCode::CREATED, Json(task)))
}

/// Fetch a single task by id
///
/// # Errors
///
/// - `401 Unauthorized`: No valid session
/// - `404 Not Found`: No such task under the caller's projects
pub async fn get_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Task>> {
    let task = Task::find_by_id_and_owner(&state.db, id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(task))
}

/// Full-replace update of a task
///
/// # Errors
///
/// - `400 Bad Request`: Missing title
/// - `401 Unauthorized`: No valid session
/// - `404 Not Found`: No such task under the caller's projects
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    req.validate()?;

    let task = Task::update_for_owner(
        &state.db,
        id,
        auth.user_id,
        UpdateTask {
            title: req.title,
            description: req.description,
            completed: req.completed.unwrap_or(false),
            priority: req.priority.unwrap_or_else(|| DEFAULT_PRIORITY.to_string()),
            due_date: req.due_date,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    tracing::info!(user_id = auth.user_id, task_id = task.id, "Task updated");

    Ok(Json(task))
}

/// Delete a task
///
/// # Errors
///
/// - `401 Unauthorized`: No valid session
/// - `404 Not Found`: No such task under the caller's projects
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let deleted = Task::delete_for_owner(&state.db, id, auth.user_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    tracing::info!(user_id = auth.user_id, task_id = id, "Task deleted");

    Ok(Json(MessageResponse {
        message: "Task deleted successfully".to_string(),
    }))
}
