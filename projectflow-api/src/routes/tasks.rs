/// Task endpoints
///
/// CRUD over tasks plus the kanban status move. Reads and creation are
/// open to any authenticated user; edits, deletes, and status moves
/// require manager+ or being the task's assignee.
///
/// Every mutation that can change a project's done/total ratio finishes
/// with a progress recompute on the affected project(s). The recompute is
/// a no-op for projects pinned in manual mode.
///
/// # Endpoints
///
/// - `GET /v1/tasks` - List tasks (filterable)
/// - `POST /v1/tasks` - Create task
/// - `GET /v1/tasks/:id` - Get one task
/// - `PUT /v1/tasks/:id` - Update task
/// - `DELETE /v1/tasks/:id` - Delete task
/// - `POST /v1/tasks/:id/status` - Move task to another status

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::validation_error,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use projectflow_shared::{
    auth::{authorization::require_task_access, middleware::AuthContext},
    models::{
        project::Project,
        task::{CreateTask, Task, TaskFilter, TaskPriority, TaskStatus, UpdateTask},
    },
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Task title
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    /// Description
    pub description: Option<String>,

    /// Project the task belongs to
    pub project_id: Uuid,

    /// Assignee
    pub assignee_id: Option<Uuid>,

    /// Initial status (default todo)
    pub status: Option<TaskStatus>,

    /// Priority (default medium)
    pub priority: Option<TaskPriority>,

    /// Deadline
    pub deadline: Option<DateTime<Utc>>,
}

/// Update task request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    /// New title
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// Move the task to another project
    pub project_id: Option<Uuid>,

    /// New assignee
    pub assignee_id: Option<Uuid>,

    /// New status
    pub status: Option<TaskStatus>,

    /// New priority
    pub priority: Option<TaskPriority>,

    /// New deadline
    pub deadline: Option<DateTime<Utc>>,

    /// Set assignee to NULL (takes precedence over `assignee_id`)
    #[serde(default)]
    pub clear_assignee: bool,

    /// Set deadline to NULL (takes precedence over `deadline`)
    #[serde(default)]
    pub clear_deadline: bool,
}

/// Status move request
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    /// Target status
    pub status: TaskStatus,
}

/// Lists tasks matching the query-string filter
///
/// ```text
/// GET /v1/tasks?status=in_progress&priority=high&assignee=ana
/// ```
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(filter): Query<TaskFilter>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = Task::list(&state.db, &filter).await?;

    Ok(Json(tasks))
}

/// Creates a task (any authenticated user)
///
/// # Errors
///
/// - `404 Not Found`: `project_id` or `assignee_id` references a missing row
/// - `422 Unprocessable Entity`: Validation failed
pub async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    req.validate().map_err(validation_error)?;

    let task = Task::create(
        &state.db,
        CreateTask {
            title: req.title,
            description: req.description,
            project_id: req.project_id,
            assignee_id: req.assignee_id,
            status: req.status.unwrap_or(TaskStatus::Todo),
            priority: req.priority.unwrap_or(TaskPriority::Medium),
            deadline: req.deadline,
        },
    )
    .await?;

    // The new task changes the project's done/total ratio.
    Project::recompute_progress(&state.db, task.project_id).await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// Gets one task by ID
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Task>> {
    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(task))
}

/// Updates a task (manager+ or the task's assignee)
///
/// Moving the task to another project recomputes progress on both the old
/// and the new project.
///
/// # Errors
///
/// - `403 Forbidden`: Caller is neither privileged nor the assignee
/// - `404 Not Found`: Task (or target project) does not exist
/// - `422 Unprocessable Entity`: Validation failed
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    req.validate().map_err(validation_error)?;

    let existing = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    require_task_access(&auth, existing.assignee_id)?;

    let task = Task::update(
        &state.db,
        id,
        UpdateTask {
            title: req.title,
            description: req.description,
            project_id: req.project_id,
            assignee_id: req.assignee_id,
            status: req.status,
            priority: req.priority,
            deadline: req.deadline,
            clear_assignee: req.clear_assignee,
            clear_deadline: req.clear_deadline,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    // Recompute the project the task now belongs to, and the one it left.
    Project::recompute_progress(&state.db, task.project_id).await?;
    if existing.project_id != task.project_id {
        Project::recompute_progress(&state.db, existing.project_id).await?;
    }

    Ok(Json(task))
}

/// Deletes a task (manager+ or the task's assignee)
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let existing = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    require_task_access(&auth, existing.assignee_id)?;

    let deleted = Task::delete(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    // Recompute over the remaining tasks; an emptied project goes to 0.
    Project::recompute_progress(&state.db, deleted.project_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Moves a task to another status (kanban drag or dropdown change)
///
/// Any status may move to any other status.
///
/// # Errors
///
/// - `403 Forbidden`: Caller is neither privileged nor the assignee
/// - `404 Not Found`: Task does not exist
pub async fn set_task_status(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetStatusRequest>,
) -> ApiResult<Json<Task>> {
    let existing = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    require_task_access(&auth, existing.assignee_id)?;

    let task = Task::set_status(&state.db, id, req.status)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Project::recompute_progress(&state.db, task.project_id).await?;

    Ok(Json(task))
}
