/// Dashboard aggregations
///
/// Read-only rollups over projects and tasks, computed on demand for the
/// dashboard endpoint. Nothing here is cached or stored; every report is a
/// fresh query against the live rows.
///
/// Status breakdowns are zero-filled: a status with no rows still appears
/// in the result with count 0, so chart axes stay stable.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::project::ProjectStatus;
use crate::models::task::TaskStatus;

/// Overdue ranking is capped to keep the dashboard table readable.
pub const OVERDUE_RANKING_LIMIT: i64 = 15;

/// How many projects the "recent projects" dashboard panel shows.
pub const RECENT_PROJECTS_LIMIT: i64 = 5;

/// Headline KPI numbers for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DashboardSummary {
    /// Total number of projects
    pub total_projects: i64,

    /// Projects with status `active`
    pub active_projects: i64,

    /// Tasks not yet done (todo + in_progress)
    pub pending_tasks: i64,

    /// Tasks past their deadline and not done
    pub overdue_tasks: i64,

    /// Tasks done
    pub done_tasks: i64,

    /// Total number of tasks
    pub total_tasks: i64,
}

/// One bucket of a status breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCount<S> {
    /// The status bucket
    pub status: S,

    /// Number of rows in it (may be 0)
    pub count: i64,
}

/// Per-owner project counts for the workload table
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OwnerBreakdown {
    /// Owner's user ID
    pub owner_id: Uuid,

    /// Owner's display name
    pub owner_name: String,

    /// Projects in planning
    pub planning: i64,

    /// Active projects
    pub active: i64,

    /// Paused projects
    pub paused: i64,

    /// Completed projects
    pub completed: i64,

    /// Cancelled projects
    pub cancelled: i64,

    /// All projects owned
    pub total: i64,
}

/// One row of the overdue ranking
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OverdueProject {
    /// Project ID
    pub project_id: Uuid,

    /// Project name
    pub project_name: String,

    /// Owner's display name (None if the owner was deleted)
    pub owner_name: Option<String>,

    /// Number of overdue tasks in the project
    pub overdue_tasks: i64,

    /// Days late of the most overdue task (floored to whole days)
    pub max_overdue_days: i64,
}

/// Computes the headline KPI numbers in a single query
pub async fn dashboard_summary(pool: &PgPool) -> Result<DashboardSummary, sqlx::Error> {
    let summary = sqlx::query_as::<_, DashboardSummary>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM projects) AS total_projects,
            (SELECT COUNT(*) FROM projects WHERE status = 'active') AS active_projects,
            (SELECT COUNT(*) FROM tasks WHERE status <> 'done') AS pending_tasks,
            (SELECT COUNT(*) FROM tasks
             WHERE deadline IS NOT NULL AND deadline < NOW()
               AND status <> 'done') AS overdue_tasks,
            (SELECT COUNT(*) FROM tasks WHERE status = 'done') AS done_tasks,
            (SELECT COUNT(*) FROM tasks) AS total_tasks
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(summary)
}

/// Project counts per lifecycle status, zero-filled over every status
pub async fn project_status_counts(
    pool: &PgPool,
) -> Result<Vec<StatusCount<ProjectStatus>>, sqlx::Error> {
    let rows: Vec<(ProjectStatus, i64)> =
        sqlx::query_as("SELECT status, COUNT(*) FROM projects GROUP BY status")
            .fetch_all(pool)
            .await?;

    Ok(zero_fill(&ProjectStatus::ALL, &rows))
}

/// Task counts per kanban status, zero-filled over every status
pub async fn task_status_counts(
    pool: &PgPool,
) -> Result<Vec<StatusCount<TaskStatus>>, sqlx::Error> {
    let rows: Vec<(TaskStatus, i64)> =
        sqlx::query_as("SELECT status, COUNT(*) FROM tasks GROUP BY status")
            .fetch_all(pool)
            .await?;

    Ok(zero_fill(&TaskStatus::ALL, &rows))
}

/// Expands sparse group-by rows into one bucket per known status.
fn zero_fill<S: Copy + PartialEq>(all: &[S], rows: &[(S, i64)]) -> Vec<StatusCount<S>> {
    all.iter()
        .map(|&status| StatusCount {
            status,
            count: rows
                .iter()
                .find(|(s, _)| *s == status)
                .map(|(_, count)| *count)
                .unwrap_or(0),
        })
        .collect()
}

/// Per-owner project counts, busiest owners first
///
/// Only users owning at least one project appear. Orphaned projects
/// (owner deleted) are excluded from the table.
pub async fn owner_breakdown(pool: &PgPool) -> Result<Vec<OwnerBreakdown>, sqlx::Error> {
    let rows = sqlx::query_as::<_, OwnerBreakdown>(
        r#"
        SELECT u.id AS owner_id,
               u.name AS owner_name,
               COUNT(*) FILTER (WHERE p.status = 'planning') AS planning,
               COUNT(*) FILTER (WHERE p.status = 'active') AS active,
               COUNT(*) FILTER (WHERE p.status = 'paused') AS paused,
               COUNT(*) FILTER (WHERE p.status = 'completed') AS completed,
               COUNT(*) FILTER (WHERE p.status = 'cancelled') AS cancelled,
               COUNT(*) AS total
        FROM projects p
        JOIN users u ON u.id = p.owner_id
        GROUP BY u.id, u.name
        ORDER BY total DESC, u.name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Projects with overdue tasks, most-late first, capped at
/// [`OVERDUE_RANKING_LIMIT`] rows
pub async fn overdue_ranking(pool: &PgPool) -> Result<Vec<OverdueProject>, sqlx::Error> {
    let rows = sqlx::query_as::<_, OverdueProject>(
        r#"
        SELECT p.id AS project_id,
               p.name AS project_name,
               u.name AS owner_name,
               COUNT(*) AS overdue_tasks,
               MAX(FLOOR(EXTRACT(EPOCH FROM (NOW() - t.deadline)) / 86400))::BIGINT
                   AS max_overdue_days
        FROM tasks t
        JOIN projects p ON p.id = t.project_id
        LEFT JOIN users u ON u.id = p.owner_id
        WHERE t.deadline IS NOT NULL
          AND t.deadline < NOW()
          AND t.status <> 'done'
        GROUP BY p.id, p.name, u.name
        ORDER BY max_overdue_days DESC, overdue_tasks DESC
        LIMIT $1
        "#,
    )
    .bind(OVERDUE_RANKING_LIMIT)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_fill_adds_missing_buckets() {
        let rows = vec![(TaskStatus::Done, 3)];
        let counts = zero_fill(&TaskStatus::ALL, &rows);

        assert_eq!(counts.len(), 3);
        assert_eq!(counts[0].status, TaskStatus::Todo);
        assert_eq!(counts[0].count, 0);
        assert_eq!(counts[1].status, TaskStatus::InProgress);
        assert_eq!(counts[1].count, 0);
        assert_eq!(counts[2].status, TaskStatus::Done);
        assert_eq!(counts[2].count, 3);
    }

    #[test]
    fn test_zero_fill_preserves_enum_order() {
        let rows = vec![
            (ProjectStatus::Cancelled, 1),
            (ProjectStatus::Planning, 2),
        ];
        let counts = zero_fill(&ProjectStatus::ALL, &rows);

        let statuses: Vec<ProjectStatus> = counts.iter().map(|c| c.status).collect();
        assert_eq!(statuses, ProjectStatus::ALL.to_vec());
        assert_eq!(counts[0].count, 2);
        assert_eq!(counts[4].count, 1);
    }

    #[test]
    fn test_zero_fill_all_empty() {
        let counts = zero_fill(&TaskStatus::ALL, &[]);
        assert!(counts.iter().all(|c| c.count == 0));
    }
}
