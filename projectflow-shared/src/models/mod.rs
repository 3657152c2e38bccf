/// Database models for ProjectFlow
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: User accounts and roles
/// - `project`: Projects with status and derived/manual progress
/// - `task`: Tasks on the kanban board, the input to derived progress
/// - `reports`: Read-only dashboard aggregations
///
/// # Example
///
/// ```no_run
/// use projectflow_shared::models::user::{CreateUser, User, UserRole};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let user = User::create(&pool, CreateUser {
///     name: "Ana Souza".to_string(),
///     email: "ana.souza@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
///     role: UserRole::Manager,
///     avatar_color: "#6366f1".to_string(),
/// }).await?;
/// # Ok(())
/// # }
/// ```

pub mod project;
pub mod reports;
pub mod task;
pub mod user;
