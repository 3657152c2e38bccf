/// User model and database operations
///
/// Users authenticate with email + password and carry a global role that
/// gates mutations elsewhere in the system. Accounts are created at signup
/// or by the bulk importer and are never deleted automatically.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE user_role AS ENUM ('admin', 'manager', 'collaborator');
///
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(100) NOT NULL,
///     email VARCHAR(150) NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     role user_role NOT NULL DEFAULT 'collaborator',
///     avatar_color VARCHAR(7) NOT NULL DEFAULT '#6366f1',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     last_login_at TIMESTAMPTZ
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Global user role.
///
/// Hierarchy: `Admin > Manager > Collaborator`. Admins and managers may
/// create, edit, and delete projects; a collaborator may only act on tasks
/// assigned to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Full access, including user administration
    Admin,

    /// May manage projects and any task
    Manager,

    /// May work on tasks assigned to them
    Collaborator,
}

impl UserRole {
    /// Converts role to string for logging and display
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Manager => "manager",
            UserRole::Collaborator => "collaborator",
        }
    }

    /// Checks if this role is at least as privileged as `required`
    pub fn has_permission(&self, required: &UserRole) -> bool {
        self.permission_level() >= required.permission_level()
    }

    /// Roles allowed to create, edit, and delete projects
    pub fn can_manage_projects(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Manager)
    }

    fn permission_level(&self) -> u8 {
        match self {
            UserRole::Admin => 3,
            UserRole::Manager => 2,
            UserRole::Collaborator => 1,
        }
    }
}

/// User account
///
/// Passwords are stored as Argon2id hashes, never in plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address, unique across all users
    pub email: String,

    /// Argon2id password hash
    pub password_hash: String,

    /// Global role
    pub role: UserRole,

    /// Hex color used for the user's avatar badge (e.g. "#6366f1")
    pub avatar_color: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the user last logged in (None if never)
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Argon2id password hash (NOT a plaintext password)
    pub password_hash: String,

    /// Global role
    pub role: UserRole,

    /// Avatar badge color
    pub avatar_color: String,
}

impl User {
    /// Creates a new user
    ///
    /// # Errors
    ///
    /// Fails with a unique-constraint violation if the email is taken.
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, role, avatar_color)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, password_hash, role, avatar_color,
                      created_at, last_login_at
            "#,
        )
        .bind(data.name)
        .bind(data.email)
        .bind(data.password_hash)
        .bind(data.role)
        .bind(data.avatar_color)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, avatar_color,
                   created_at, last_login_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by email address (case-insensitive)
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, avatar_color,
                   created_at, last_login_at
            FROM users
            WHERE LOWER(email) = LOWER($1)
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Lists all users ordered by name
    ///
    /// Used by the owner/assignee pickers in the presentation layer.
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, avatar_color,
                   created_at, last_login_at
            FROM users
            ORDER BY name ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    /// Updates the last login timestamp after a successful authentication
    pub async fn update_last_login(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts total number of users
    ///
    /// The bulk importer uses this as its idempotence guard: a non-zero
    /// count means the database was already seeded.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_as_str() {
        assert_eq!(UserRole::Admin.as_str(), "admin");
        assert_eq!(UserRole::Manager.as_str(), "manager");
        assert_eq!(UserRole::Collaborator.as_str(), "collaborator");
    }

    #[test]
    fn test_role_hierarchy() {
        assert!(UserRole::Admin.has_permission(&UserRole::Manager));
        assert!(UserRole::Admin.has_permission(&UserRole::Collaborator));
        assert!(UserRole::Manager.has_permission(&UserRole::Collaborator));

        assert!(!UserRole::Collaborator.has_permission(&UserRole::Manager));
        assert!(!UserRole::Manager.has_permission(&UserRole::Admin));
    }

    #[test]
    fn test_role_can_manage_projects() {
        assert!(UserRole::Admin.can_manage_projects());
        assert!(UserRole::Manager.can_manage_projects());
        assert!(!UserRole::Collaborator.can_manage_projects());
    }

    #[test]
    fn test_role_serde_lowercase() {
        let json = serde_json::to_string(&UserRole::Collaborator).unwrap();
        assert_eq!(json, "\"collaborator\"");

        let role: UserRole = serde_json::from_str("\"manager\"").unwrap();
        assert_eq!(role, UserRole::Manager);
    }

    // Integration tests for database operations require a running Postgres.
}
