/// Project endpoints
///
/// CRUD over projects. Reads are open to any authenticated user; every
/// mutation requires manager or admin.
///
/// # Endpoints
///
/// - `GET /v1/projects` - List projects (filterable)
/// - `POST /v1/projects` - Create project
/// - `GET /v1/projects/:id` - Get one project
/// - `PUT /v1/projects/:id` - Update project
/// - `DELETE /v1/projects/:id` - Delete project (cascades to its tasks)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
    routes::validation_error,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use projectflow_shared::{
    auth::{authorization::require_project_manager, middleware::AuthContext},
    models::project::{
        CreateProject, Project, ProjectFilter, ProjectStatus, ProgressMode, UpdateProject,
    },
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Create project request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    /// Project name
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,

    /// Description
    pub description: Option<String>,

    /// Owning user
    pub owner_id: Option<Uuid>,

    /// Planned start
    pub start_date: Option<DateTime<Utc>>,

    /// Planned end
    pub end_date: Option<DateTime<Utc>>,

    /// Initial status (default planning)
    pub status: Option<ProjectStatus>,
}

/// Update project request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    /// New name
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New owner
    pub owner_id: Option<Uuid>,

    /// New planned start
    pub start_date: Option<DateTime<Utc>>,

    /// New planned end
    pub end_date: Option<DateTime<Utc>>,

    /// New lifecycle status
    pub status: Option<ProjectStatus>,

    /// Manual progress override in [0, 100]; pins manual mode
    pub progress: Option<f64>,

    /// Explicit progress mode switch
    pub progress_mode: Option<ProgressMode>,
}

/// Lists projects matching the query-string filter
///
/// ```text
/// GET /v1/projects?search=refinery&status=active&overdue=with_overdue
/// ```
pub async fn list_projects(
    State(state): State<AppState>,
    Query(filter): Query<ProjectFilter>,
) -> ApiResult<Json<Vec<Project>>> {
    let projects = Project::list(&state.db, &filter).await?;

    Ok(Json(projects))
}

/// Creates a project (manager or admin only)
///
/// # Errors
///
/// - `403 Forbidden`: Caller is a collaborator
/// - `422 Unprocessable Entity`: Validation failed
/// - `404 Not Found`: `owner_id` references a missing user
pub async fn create_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateProjectRequest>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    require_project_manager(&auth)?;
    req.validate().map_err(validation_error)?;

    let project = Project::create(
        &state.db,
        CreateProject {
            name: req.name,
            description: req.description,
            owner_id: req.owner_id,
            start_date: req.start_date,
            end_date: req.end_date,
            status: req.status.unwrap_or(ProjectStatus::Planning),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(project)))
}

/// Gets one project by ID
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Project>> {
    let project = Project::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(Json(project))
}

/// Updates a project (manager or admin only)
///
/// Supplying `progress` pins a manual percentage. Switching
/// `progress_mode` back to `derived` recomputes from the task set
/// immediately, so the response already carries the derived value.
///
/// # Errors
///
/// - `403 Forbidden`: Caller is a collaborator
/// - `404 Not Found`: Project does not exist
/// - `422 Unprocessable Entity`: Validation failed or progress out of range
pub async fn update_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProjectRequest>,
) -> ApiResult<Json<Project>> {
    require_project_manager(&auth)?;
    req.validate().map_err(validation_error)?;

    if let Some(progress) = req.progress {
        if !(0.0..=100.0).contains(&progress) {
            return Err(ApiError::ValidationError(vec![ValidationErrorDetail {
                field: "progress".to_string(),
                message: "Progress must be between 0 and 100".to_string(),
            }]));
        }
    }

    let released_to_derived = req.progress_mode == Some(ProgressMode::Derived);

    let project = Project::update(
        &state.db,
        id,
        UpdateProject {
            name: req.name,
            description: req.description,
            owner_id: req.owner_id,
            start_date: req.start_date,
            end_date: req.end_date,
            status: req.status,
            progress: req.progress,
            progress_mode: req.progress_mode,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    // Releasing a manual pin resyncs progress with the task set right away.
    if released_to_derived {
        Project::recompute_progress(&state.db, id).await?;

        let project = Project::find_by_id(&state.db, id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

        return Ok(Json(project));
    }

    Ok(Json(project))
}

/// Deletes a project and all of its tasks (manager or admin only)
pub async fn delete_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    require_project_manager(&auth)?;

    let deleted = Project::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Project not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
