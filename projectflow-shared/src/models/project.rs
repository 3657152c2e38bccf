/// Project model and database operations
///
/// A project groups tasks and carries a completion percentage. By default
/// the percentage is *derived* from its tasks (see `crate::progress`); a
/// manager can instead pin a manual value, which flips `progress_mode` to
/// `manual` and detaches the percentage from task mutations until the mode
/// is switched back.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE project_status AS ENUM (
///     'planning', 'active', 'paused', 'completed', 'cancelled'
/// );
/// CREATE TYPE progress_mode AS ENUM ('derived', 'manual');
///
/// CREATE TABLE projects (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(200) NOT NULL,
///     description TEXT,
///     owner_id UUID REFERENCES users(id) ON DELETE SET NULL,
///     start_date TIMESTAMPTZ,
///     end_date TIMESTAMPTZ,
///     status project_status NOT NULL DEFAULT 'planning',
///     progress DOUBLE PRECISION NOT NULL DEFAULT 0
///         CHECK (progress >= 0 AND progress <= 100),
///     progress_mode progress_mode NOT NULL DEFAULT 'derived',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Lifecycle status of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    /// Being planned, work not started
    Planning,

    /// Work in progress
    Active,

    /// Temporarily on hold
    Paused,

    /// Finished
    Completed,

    /// Abandoned
    Cancelled,
}

impl ProjectStatus {
    /// Every status, in lifecycle order. Aggregations iterate this so that
    /// statuses with zero projects still appear with a zero count.
    pub const ALL: [ProjectStatus; 5] = [
        ProjectStatus::Planning,
        ProjectStatus::Active,
        ProjectStatus::Paused,
        ProjectStatus::Completed,
        ProjectStatus::Cancelled,
    ];

    /// Converts status to string for database storage and logging
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Planning => "planning",
            ProjectStatus::Active => "active",
            ProjectStatus::Paused => "paused",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Cancelled => "cancelled",
        }
    }
}

/// Where a project's progress number comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "progress_mode", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProgressMode {
    /// Computed from the task set (done / total)
    Derived,

    /// Pinned by a manager; task mutations leave it untouched
    Manual,
}

/// Project model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    /// Unique project ID
    pub id: Uuid,

    /// Project name
    pub name: String,

    /// Free-form description
    pub description: Option<String>,

    /// Owning user (nullable if owner deleted)
    pub owner_id: Option<Uuid>,

    /// Planned start
    pub start_date: Option<DateTime<Utc>>,

    /// Planned end
    pub end_date: Option<DateTime<Utc>>,

    /// Lifecycle status
    pub status: ProjectStatus,

    /// Completion percentage, always within [0, 100]
    pub progress: f64,

    /// Whether `progress` is derived from tasks or pinned manually
    pub progress_mode: ProgressMode,

    /// When the project was created
    pub created_at: DateTime<Utc>,

    /// When the project was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    /// Project name
    pub name: String,

    /// Description
    pub description: Option<String>,

    /// Owning user
    pub owner_id: Option<Uuid>,

    /// Planned start
    pub start_date: Option<DateTime<Utc>>,

    /// Planned end
    pub end_date: Option<DateTime<Utc>>,

    /// Initial status (default Planning)
    #[serde(default = "default_status")]
    pub status: ProjectStatus,
}

fn default_status() -> ProjectStatus {
    ProjectStatus::Planning
}

/// Input for updating a project
///
/// Supplying `progress` pins a manual percentage and flips the mode to
/// `manual`. Supplying `progress_mode = derived` releases the pin and the
/// caller should recompute immediately.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProject {
    /// New name
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

    /// Manual progress override in [0, 100]
    pub progress: Option<f64>,

    /// Explicit mode switch
    pub progress_mode: Option<ProgressMode>,
}

/// Whether the overdue predicate restricts a project listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverdueFilter {
    /// No restriction
    #[default]
    Any,

    /// Only projects with at least one overdue task
    WithOverdue,

    /// Only projects with no overdue task
    OnTime,
}

/// Filter for listing projects. All present fields are combined with AND.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectFilter {
    /// Case-insensitive substring match on name
    pub search: Option<String>,

    /// Restrict to a single status
    pub status: Option<ProjectStatus>,

    /// Restrict to a single owner
    pub owner_id: Option<Uuid>,

    /// Restrict by overdue-task presence
    #[serde(default)]
    pub overdue: OverdueFilter,
}

/// EXISTS clause matching projects with at least one overdue task.
/// A task is overdue iff it has a past deadline and is not done.
const OVERDUE_EXISTS: &str = "EXISTS (SELECT 1 FROM tasks t \
     WHERE t.project_id = p.id AND t.deadline IS NOT NULL \
       AND t.deadline < NOW() AND t.status <> 'done')";

impl Project {
    /// Creates a new project with progress 0 in derived mode
    pub async fn create(pool: &PgPool, data: CreateProject) -> Result<Self, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (name, description, owner_id, start_date, end_date, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, description, owner_id, start_date, end_date, status,
                      progress, progress_mode, created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.description)
        .bind(data.owner_id)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.status)
        .fetch_one(pool)
        .await?;

        Ok(project)
    }

    /// Finds a project by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, owner_id, start_date, end_date, status,
                   progress, progress_mode, created_at, updated_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Lists projects matching a filter, newest first
    pub async fn list(pool: &PgPool, filter: &ProjectFilter) -> Result<Vec<Self>, sqlx::Error> {
        let mut query = String::from(
            r#"
            SELECT p.id, p.name, p.description, p.owner_id, p.start_date, p.end_date,
                   p.status, p.progress, p.progress_mode, p.created_at, p.updated_at
            FROM projects p
            WHERE 1 = 1
            "#,
        );
        let mut bind_count = 0;

        if filter.search.is_some() {
            bind_count += 1;
            query.push_str(&format!(" AND p.name ILIKE ${}", bind_count));
        }
        if filter.status.is_some() {
            bind_count += 1;
            query.push_str(&format!(" AND p.status = ${}", bind_count));
        }
        if filter.owner_id.is_some() {
            bind_count += 1;
            query.push_str(&format!(" AND p.owner_id = ${}", bind_count));
        }
        match filter.overdue {
            OverdueFilter::Any => {}
            OverdueFilter::WithOverdue => {
                query.push_str(&format!(" AND {}", OVERDUE_EXISTS));
            }
            OverdueFilter::OnTime => {
                query.push_str(&format!(" AND NOT {}", OVERDUE_EXISTS));
            }
        }

        query.push_str(" ORDER BY p.created_at DESC");

        let mut q = sqlx::query_as::<_, Project>(&query);

        if let Some(search) = &filter.search {
            q = q.bind(format!("%{}%", search));
        }
        if let Some(status) = filter.status {
            q = q.bind(status);
        }
        if let Some(owner_id) = filter.owner_id {
            q = q.bind(owner_id);
        }

        let projects = q.fetch_all(pool).await?;

        Ok(projects)
    }

    /// Lists the most recently created projects
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<Self>, sqlx::Error> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, owner_id, start_date, end_date, status,
                   progress, progress_mode, created_at, updated_at
            FROM projects
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(projects)
    }

    /// Updates a project's mutable fields
    ///
    /// A `progress` value pins manual mode unless the same call explicitly
    /// sets `progress_mode`. Returns `None` if the project does not exist;
    /// the caller recomputes when the mode switched back to derived.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateProject,
    ) -> Result<Option<Self>, sqlx::Error> {
        // An explicit mode wins; a bare progress override implies manual.
        let mode = match (data.progress_mode, data.progress) {
            (Some(mode), _) => Some(mode),
            (None, Some(_)) => Some(ProgressMode::Manual),
            (None, None) => None,
        };

        let mut query = String::from("UPDATE projects SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.name.is_some() {
            bind_count += 1;
            query.push_str(&format!(", name = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }
        if data.owner_id.is_some() {
            bind_count += 1;
            query.push_str(&format!(", owner_id = ${}", bind_count));
        }
        if data.start_date.is_some() {
            bind_count += 1;
            query.push_str(&format!(", start_date = ${}", bind_count));
        }
        if data.end_date.is_some() {
            bind_count += 1;
            query.push_str(&format!(", end_date = ${}", bind_count));
        }
        if data.status.is_some() {
            bind_count += 1;
            query.push_str(&format!(", status = ${}", bind_count));
        }
        if data.progress.is_some() {
            bind_count += 1;
            query.push_str(&format!(", progress = ${}", bind_count));
        }
        if mode.is_some() {
            bind_count += 1;
            query.push_str(&format!(", progress_mode = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, name, description, owner_id, start_date, \
             end_date, status, progress, progress_mode, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, Project>(&query).bind(id);

        if let Some(name) = data.name {
            q = q.bind(name);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(owner_id) = data.owner_id {
            q = q.bind(owner_id);
        }
        if let Some(start_date) = data.start_date {
            q = q.bind(start_date);
        }
        if let Some(end_date) = data.end_date {
            q = q.bind(end_date);
        }
        if let Some(status) = data.status {
            q = q.bind(status);
        }
        if let Some(progress) = data.progress {
            q = q.bind(progress);
        }
        if let Some(mode) = mode {
            q = q.bind(mode);
        }

        let project = q.fetch_optional(pool).await?;

        Ok(project)
    }

    /// Recomputes derived progress from the current task set
    ///
    /// Single statement: `100 * done / total`, 0 for an empty task set.
    /// A no-op while the project is in manual mode (the WHERE clause skips
    /// it), so task mutations can call this unconditionally.
    pub async fn recompute_progress(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE projects
            SET progress = COALESCE(
                    (SELECT 100.0 * COUNT(*) FILTER (WHERE t.status = 'done')
                            / NULLIF(COUNT(*), 0)
                     FROM tasks t
                     WHERE t.project_id = projects.id),
                    0),
                updated_at = NOW()
            WHERE id = $1 AND progress_mode = 'derived'
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Deletes a project
    ///
    /// All of its tasks go with it (ON DELETE CASCADE).
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_status_as_str() {
        assert_eq!(ProjectStatus::Planning.as_str(), "planning");
        assert_eq!(ProjectStatus::Active.as_str(), "active");
        assert_eq!(ProjectStatus::Paused.as_str(), "paused");
        assert_eq!(ProjectStatus::Completed.as_str(), "completed");
        assert_eq!(ProjectStatus::Cancelled.as_str(), "cancelled");
    }

    #[test]
    fn test_project_status_all_covers_every_variant() {
        assert_eq!(ProjectStatus::ALL.len(), 5);
        assert_eq!(ProjectStatus::ALL[0], ProjectStatus::Planning);
        assert_eq!(ProjectStatus::ALL[4], ProjectStatus::Cancelled);
    }

    #[test]
    fn test_overdue_filter_default_is_any() {
        assert_eq!(OverdueFilter::default(), OverdueFilter::Any);

        let filter: ProjectFilter = serde_json::from_str("{}").unwrap();
        assert_eq!(filter.overdue, OverdueFilter::Any);
    }

    #[test]
    fn test_overdue_filter_deserializes_snake_case() {
        let filter: OverdueFilter = serde_json::from_str("\"with_overdue\"").unwrap();
        assert_eq!(filter, OverdueFilter::WithOverdue);

        let filter: OverdueFilter = serde_json::from_str("\"on_time\"").unwrap();
        assert_eq!(filter, OverdueFilter::OnTime);
    }

    #[test]
    fn test_create_project_default_status() {
        let json = r#"{"name": "Refinery upgrade"}"#;
        let data: CreateProject = serde_json::from_str(json).unwrap();
        assert_eq!(data.status, ProjectStatus::Planning);
    }
}
