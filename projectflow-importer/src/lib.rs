//! # ProjectFlow Importer Library
//!
//! Seeds an empty ProjectFlow database from a planner export: one JSON
//! file holding the exported rows plus the list of people who should be
//! created as managers. The pure row-mapping vocabulary lives in
//! `projectflow_shared::import`; this crate owns the database side of the
//! pipeline (users, projects, tasks) and the demo seed.
//!
//! The importer only ever runs against an empty database: a non-zero user
//! count means the data is already there and the run becomes a no-op.

use std::collections::{HashMap, HashSet};

use sqlx::PgPool;
use uuid::Uuid;

use projectflow_shared::auth::password::{self, PasswordError};
use projectflow_shared::import::{
    assign_email, collect_people, map_row, ImportFile, AVATAR_PALETTE,
};
use projectflow_shared::models::{
    project::{CreateProject, Project, ProjectStatus, UpdateProject},
    task::{CreateTask, Task, TaskPriority, TaskStatus},
    user::{CreateUser, User, UserRole},
};

/// Password given to every imported account. Users are expected to change
/// it on first login; override with `IMPORT_DEFAULT_PASSWORD`.
const DEFAULT_IMPORT_PASSWORD: &str = "ProjectFlow!2025";

/// Error type for import operations
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing failed
    #[error("Password hashing failed: {0}")]
    Password(#[from] PasswordError),
}

/// What an import run created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportStats {
    /// Users created
    pub users: usize,

    /// Projects created
    pub projects: usize,

    /// Tasks created
    pub tasks: usize,
}

/// Picks the role an imported person gets
///
/// People named in the leaders list become managers; everyone else is a
/// collaborator. Imports never create admins.
pub fn role_for(name: &str, leaders: &[String]) -> UserRole {
    if leaders.iter().any(|l| l == name) {
        UserRole::Manager
    } else {
        UserRole::Collaborator
    }
}

/// Avatar color for the nth created account, cycling the palette
pub fn avatar_for(index: usize) -> &'static str {
    AVATAR_PALETTE[index % AVATAR_PALETTE.len()]
}

/// Returns the import password from the environment, or the default
fn import_password() -> String {
    std::env::var("IMPORT_DEFAULT_PASSWORD")
        .unwrap_or_else(|_| DEFAULT_IMPORT_PASSWORD.to_string())
}

/// Runs a full import against an empty database
///
/// Creates one account per person mentioned anywhere in the rows, then one
/// project per row with its checklist exploded into tasks. Imported
/// projects keep the export's progress percentage, pinned as a manual
/// value so later task edits don't overwrite the historical number.
///
/// Returns `None` (without touching the database) if users already exist.
pub async fn run_import(
    pool: &PgPool,
    file: ImportFile,
) -> Result<Option<ImportStats>, ImportError> {
    if User::count(pool).await? > 0 {
        tracing::info!("Database already seeded, skipping import");
        return Ok(None);
    }

    let mut stats = ImportStats::default();

    // One Argon2 hash shared by every seeded account.
    let password_hash = password::hash_password(&import_password())?;

    let mut users_by_name: HashMap<String, Uuid> = HashMap::new();
    let mut used_emails: HashSet<String> = HashSet::new();

    for (i, name) in collect_people(&file.rows).iter().enumerate() {
        let email = assign_email(name, &mut used_emails);
        let role = role_for(name, &file.leaders);

        let user = User::create(
            pool,
            CreateUser {
                name: name.clone(),
                email: email.clone(),
                password_hash: password_hash.clone(),
                role,
                avatar_color: avatar_for(i).to_string(),
            },
        )
        .await?;

        tracing::debug!(name = %name, email = %email, role = role.as_str(), "Created user");
        users_by_name.insert(name.clone(), user.id);
        stats.users += 1;
    }

    for row in &file.rows {
        let Some(mapped) = map_row(row) else {
            continue;
        };

        let owner_id = mapped
            .owner
            .as_deref()
            .and_then(|name| users_by_name.get(name).copied());

        let project = Project::create(
            pool,
            CreateProject {
                name: mapped.name.clone(),
                description: mapped.description.clone(),
                owner_id,
                start_date: mapped.start_date,
                end_date: mapped.end_date,
                status: mapped.status,
            },
        )
        .await?;

        // Pin the export's percentage; the update flips the mode to manual.
        Project::update(
            pool,
            project.id,
            UpdateProject {
                progress: Some(mapped.progress),
                ..Default::default()
            },
        )
        .await?;

        stats.projects += 1;

        for task in &mapped.tasks {
            let assignee_id = task
                .assignee
                .as_deref()
                .and_then(|name| users_by_name.get(name).copied());

            Task::create(
                pool,
                CreateTask {
                    title: task.title.clone(),
                    description: task.description.clone(),
                    project_id: project.id,
                    assignee_id,
                    status: task.status,
                    priority: task.priority,
                    deadline: task.deadline,
                },
            )
            .await?;

            stats.tasks += 1;
        }

        tracing::debug!(
            project = %mapped.name,
            tasks = mapped.tasks.len(),
            "Imported project"
        );
    }

    tracing::info!(
        users = stats.users,
        projects = stats.projects,
        tasks = stats.tasks,
        "Import complete"
    );

    Ok(Some(stats))
}

/// Seeds a small demo data set instead of a planner export
///
/// Creates one account per role plus a couple of projects with tasks in
/// derived mode, so a fresh checkout has something on the dashboard.
/// Same idempotence guard as [`run_import`].
pub async fn seed_demo(pool: &PgPool) -> Result<Option<ImportStats>, ImportError> {
    if User::count(pool).await? > 0 {
        tracing::info!("Database already seeded, skipping demo seed");
        return Ok(None);
    }

    let mut stats = ImportStats::default();
    let password_hash = password::hash_password(&import_password())?;

    let accounts = [
        ("Alice Admin", "admin@projectflow.local", UserRole::Admin),
        ("Marta Manager", "marta@projectflow.local", UserRole::Manager),
        ("Carl Collaborator", "carl@projectflow.local", UserRole::Collaborator),
    ];

    let mut ids = Vec::new();
    for (i, (name, email, role)) in accounts.iter().enumerate() {
        let user = User::create(
            pool,
            CreateUser {
                name: name.to_string(),
                email: email.to_string(),
                password_hash: password_hash.clone(),
                role: *role,
                avatar_color: avatar_for(i).to_string(),
            },
        )
        .await?;
        ids.push(user.id);
        stats.users += 1;
    }

    let manager_id = ids[1];
    let collaborator_id = ids[2];

    let website = Project::create(
        pool,
        CreateProject {
            name: "Website relaunch".to_string(),
            description: Some("Marketing site refresh for the new brand".to_string()),
            owner_id: Some(manager_id),
            start_date: None,
            end_date: None,
            status: ProjectStatus::Active,
        },
    )
    .await?;
    stats.projects += 1;

    let demo_tasks = [
        ("Draft information architecture", TaskStatus::Done, TaskPriority::High),
        ("Design landing page", TaskStatus::InProgress, TaskPriority::Medium),
        ("Write copy for pricing page", TaskStatus::Todo, TaskPriority::Medium),
        ("Set up analytics", TaskStatus::Todo, TaskPriority::Low),
    ];

    for (title, status, priority) in demo_tasks {
        Task::create(
            pool,
            CreateTask {
                title: title.to_string(),
                description: None,
                project_id: website.id,
                assignee_id: Some(collaborator_id),
                status,
                priority,
                deadline: None,
            },
        )
        .await?;
        stats.tasks += 1;
    }

    // Derived mode: bring the percentage in line with the tasks above.
    Project::recompute_progress(pool, website.id).await?;

    let audit = Project::create(
        pool,
        CreateProject {
            name: "Security audit".to_string(),
            description: None,
            owner_id: Some(manager_id),
            start_date: None,
            end_date: None,
            status: ProjectStatus::Planning,
        },
    )
    .await?;
    stats.projects += 1;

    Task::create(
        pool,
        CreateTask {
            title: "Collect dependency inventory".to_string(),
            description: None,
            project_id: audit.id,
            assignee_id: None,
            status: TaskStatus::Todo,
            priority: TaskPriority::Critical,
            deadline: None,
        },
    )
    .await?;
    stats.tasks += 1;

    Project::recompute_progress(pool, audit.id).await?;

    tracing::info!(
        users = stats.users,
        projects = stats.projects,
        tasks = stats.tasks,
        "Demo seed complete"
    );

    Ok(Some(stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_for_leaders_become_managers() {
        let leaders = vec!["Ana Souza".to_string(), "Bruno Lima".to_string()];

        assert_eq!(role_for("Ana Souza", &leaders), UserRole::Manager);
        assert_eq!(role_for("Bruno Lima", &leaders), UserRole::Manager);
        assert_eq!(role_for("Carla Dias", &leaders), UserRole::Collaborator);
    }

    #[test]
    fn test_role_for_never_admin() {
        let leaders: Vec<String> = vec![];
        assert_eq!(role_for("Anyone", &leaders), UserRole::Collaborator);
    }

    #[test]
    fn test_avatar_for_cycles_palette() {
        assert_eq!(avatar_for(0), AVATAR_PALETTE[0]);
        assert_eq!(avatar_for(AVATAR_PALETTE.len()), AVATAR_PALETTE[0]);
        assert_eq!(avatar_for(AVATAR_PALETTE.len() + 3), AVATAR_PALETTE[3]);
    }

    // Integration tests for run_import/seed_demo require a running database.
}
