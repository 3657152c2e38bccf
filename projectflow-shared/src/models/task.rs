/// Task model and database operations
///
/// Tasks are the unit of work inside a project and the input to the
/// progress engine: a project's derived progress is the share of its tasks
/// in `Done`. Status transitions are unrestricted (any status to any
/// status); mutations that change a project's task set trigger a progress
/// recomputation via [`crate::models::project::Project::recompute_progress`].
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('todo', 'in_progress', 'done');
/// CREATE TYPE task_priority AS ENUM ('low', 'medium', 'high', 'critical');
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(200) NOT NULL,
///     description TEXT,
///     project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     assignee_id UUID REFERENCES users(id) ON DELETE SET NULL,
///     status task_status NOT NULL DEFAULT 'todo',
///     priority task_priority NOT NULL DEFAULT 'medium',
///     deadline TIMESTAMPTZ,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Kanban column a task sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started
    Todo,

    /// Being worked on
    InProgress,

    /// Finished; counts toward derived progress
    Done,
}

impl TaskStatus {
    /// Every status, in board order. Aggregations iterate this so that
    /// statuses with zero tasks still appear with a zero count.
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

    /// Converts status to string for database storage and logging
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl TaskPriority {
    /// Every priority, lowest first
    pub const ALL: [TaskPriority; 4] = [
        TaskPriority::Low,
        TaskPriority::Medium,
        TaskPriority::High,
        TaskPriority::Critical,
    ];

    /// Converts priority to string for database storage and logging
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
            TaskPriority::Critical => "critical",
        }
    }
}

/// Task model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Short title shown on the kanban card
    pub title: String,

    /// Free-form description
    pub description: Option<String>,

    /// Project this task belongs to
    pub project_id: Uuid,

    /// Assigned user (nullable if unassigned or user deleted)
    pub assignee_id: Option<Uuid>,

    /// Kanban status
    pub status: TaskStatus,

    /// Priority
    pub priority: TaskPriority,

    /// Optional deadline; a past deadline on a non-Done task means overdue
    pub deadline: Option<DateTime<Utc>>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Task title
    pub title: String,

    /// Description
    pub description: Option<String>,

    /// Project the task belongs to (must exist)
    pub project_id: Uuid,

    /// Assignee (must exist if given)
    pub assignee_id: Option<Uuid>,

    /// Initial status (default Todo)
    #[serde(default = "default_status")]
    pub status: TaskStatus,

    /// Priority (default Medium)
    #[serde(default = "default_priority")]
    pub priority: TaskPriority,

    /// Deadline
    pub deadline: Option<DateTime<Utc>>,
}

fn default_status() -> TaskStatus {
    TaskStatus::Todo
}

fn default_priority() -> TaskPriority {
    TaskPriority::Medium
}

/// Input for updating a task
///
/// Only fields that are `Some` are written; absent fields keep their
/// current value. Clearing a nullable field (assignee, deadline,
/// description) is done through the dedicated `clear_*` flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// Move the task to another project (must exist)
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

/// Filter for listing tasks. All present fields are combined with AND;
/// absent fields match everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskFilter {
    /// Case-insensitive substring match on title
    pub search: Option<String>,

    /// Restrict to a single project
    pub project_id: Option<Uuid>,

    /// Restrict to a single status
    pub status: Option<TaskStatus>,

    /// Restrict to a single priority
    pub priority: Option<TaskPriority>,

    /// Case-insensitive substring match on the assignee's name
    pub assignee: Option<String>,
}

impl Task {
    /// Creates a new task
    ///
    /// Fails with a foreign-key violation if the project (or assignee) does
    /// not exist. Callers should recompute the parent project's progress
    /// afterwards.
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, project_id, assignee_id, status, priority, deadline)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, title, description, project_id, assignee_id, status, priority,
                      deadline, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.project_id)
        .bind(data.assignee_id)
        .bind(data.status)
        .bind(data.priority)
        .bind(data.deadline)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, project_id, assignee_id, status, priority,
                   deadline, created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists tasks matching a filter, newest first
    ///
    /// The `assignee` filter joins on users, so unassigned tasks never match
    /// it. Zero matches yield an empty Vec.
    pub async fn list(pool: &PgPool, filter: &TaskFilter) -> Result<Vec<Self>, sqlx::Error> {
        let mut query = String::from(
            r#"
            SELECT t.id, t.title, t.description, t.project_id, t.assignee_id, t.status,
                   t.priority, t.deadline, t.created_at, t.updated_at
            FROM tasks t
            LEFT JOIN users u ON u.id = t.assignee_id
            WHERE 1 = 1
            "#,
        );
        let mut bind_count = 0;

        if filter.search.is_some() {
            bind_count += 1;
            query.push_str(&format!(" AND t.title ILIKE ${}", bind_count));
        }
        if filter.project_id.is_some() {
            bind_count += 1;
            query.push_str(&format!(" AND t.project_id = ${}", bind_count));
        }
        if filter.status.is_some() {
            bind_count += 1;
            query.push_str(&format!(" AND t.status = ${}", bind_count));
        }
        if filter.priority.is_some() {
            bind_count += 1;
            query.push_str(&format!(" AND t.priority = ${}", bind_count));
        }
        if filter.assignee.is_some() {
            bind_count += 1;
            query.push_str(&format!(" AND u.name ILIKE ${}", bind_count));
        }

        query.push_str(" ORDER BY t.created_at DESC");

        let mut q = sqlx::query_as::<_, Task>(&query);

        if let Some(search) = &filter.search {
            q = q.bind(format!("%{}%", search));
        }
        if let Some(project_id) = filter.project_id {
            q = q.bind(project_id);
        }
        if let Some(status) = filter.status {
            q = q.bind(status);
        }
        if let Some(priority) = filter.priority {
            q = q.bind(priority);
        }
        if let Some(assignee) = &filter.assignee {
            q = q.bind(format!("%{}%", assignee));
        }

        let tasks = q.fetch_all(pool).await?;

        Ok(tasks)
    }

    /// Lists every task in a project, oldest first (board order)
    pub async fn list_by_project(pool: &PgPool, project_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, project_id, assignee_id, status, priority,
                   deadline, created_at, updated_at
            FROM tasks
            WHERE project_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(project_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Updates a task's mutable fields
    ///
    /// Returns `None` if the task does not exist. Callers should recompute
    /// the project's progress when the status changed; a move between
    /// projects means recomputing both the old and the new project.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = String::from("UPDATE tasks SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }
        if data.project_id.is_some() {
            bind_count += 1;
            query.push_str(&format!(", project_id = ${}", bind_count));
        }
        if data.clear_assignee {
            query.push_str(", assignee_id = NULL");
        } else if data.assignee_id.is_some() {
            bind_count += 1;
            query.push_str(&format!(", assignee_id = ${}", bind_count));
        }
        if data.status.is_some() {
            bind_count += 1;
            query.push_str(&format!(", status = ${}", bind_count));
        }
        if data.priority.is_some() {
            bind_count += 1;
            query.push_str(&format!(", priority = ${}", bind_count));
        }
        if data.clear_deadline {
            query.push_str(", deadline = NULL");
        } else if data.deadline.is_some() {
            bind_count += 1;
            query.push_str(&format!(", deadline = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, title, description, project_id, assignee_id, \
             status, priority, deadline, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, Task>(&query).bind(id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(project_id) = data.project_id {
            q = q.bind(project_id);
        }
        if !data.clear_assignee {
            if let Some(assignee_id) = data.assignee_id {
                q = q.bind(assignee_id);
            }
        }
        if let Some(status) = data.status {
            q = q.bind(status);
        }
        if let Some(priority) = data.priority {
            q = q.bind(priority);
        }
        if !data.clear_deadline {
            if let Some(deadline) = data.deadline {
                q = q.bind(deadline);
            }
        }

        let task = q.fetch_optional(pool).await?;

        Ok(task)
    }

    /// Moves a task to a new status (kanban drag or dropdown change)
    ///
    /// Any status may move to any other status; there is no transition
    /// table to validate against. Returns `None` if the task is missing.
    pub async fn set_status(
        pool: &PgPool,
        id: Uuid,
        status: TaskStatus,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET status = $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, project_id, assignee_id, status, priority,
                      deadline, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task
    ///
    /// Returns the deleted task so the caller knows which project to
    /// recompute, or `None` if it did not exist.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            DELETE FROM tasks
            WHERE id = $1
            RETURNING id, title, description, project_id, assignee_id, status, priority,
                      deadline, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Counts tasks in a project
    pub async fn count_by_project(pool: &PgPool, project_id: Uuid) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE project_id = $1")
            .bind(project_id)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
