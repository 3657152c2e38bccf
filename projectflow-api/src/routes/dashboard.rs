/// Dashboard endpoint
///
/// Returns every aggregation the dashboard needs in one payload: headline
/// KPIs, zero-filled status breakdowns, the per-owner workload table, the
/// overdue ranking, and the most recent projects. Everything is computed
/// fresh from the live rows on each request.
///
/// # Endpoints
///
/// - `GET /v1/dashboard` - Full dashboard payload

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use projectflow_shared::models::{
    project::{Project, ProjectStatus},
    reports::{
        self, DashboardSummary, OverdueProject, OwnerBreakdown, StatusCount,
        RECENT_PROJECTS_LIMIT,
    },
    task::TaskStatus,
};
use serde::Serialize;

/// Full dashboard payload
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    /// Headline KPI numbers
    pub summary: DashboardSummary,

    /// Project counts per lifecycle status (zero-filled)
    pub project_status_counts: Vec<StatusCount<ProjectStatus>>,

    /// Task counts per kanban status (zero-filled)
    pub task_status_counts: Vec<StatusCount<TaskStatus>>,

    /// Per-owner project counts, busiest first
    pub owner_breakdown: Vec<OwnerBreakdown>,

    /// Projects with overdue tasks, most-late first
    pub overdue_ranking: Vec<OverdueProject>,

    /// Most recently created projects
    pub recent_projects: Vec<Project>,
}

/// Dashboard handler
pub async fn dashboard(State(state): State<AppState>) -> ApiResult<Json<DashboardResponse>> {
    let summary = reports::dashboard_summary(&state.db).await?;
    let project_status_counts = reports::project_status_counts(&state.db).await?;
    let task_status_counts = reports::task_status_counts(&state.db).await?;
    let owner_breakdown = reports::owner_breakdown(&state.db).await?;
    let overdue_ranking = reports::overdue_ranking(&state.db).await?;
    let recent_projects = Project::list_recent(&state.db, RECENT_PROJECTS_LIMIT).await?;

    Ok(Json(DashboardResponse {
        summary,
        project_status_counts,
        task_status_counts,
        owner_breakdown,
        overdue_ranking,
        recent_projects,
    }))
}
