/// User directory endpoint
///
/// Read-only listing used by the owner and assignee pickers. Responses
/// never include the password hash.
///
/// # Endpoints
///
/// - `GET /v1/users` - List all users

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use projectflow_shared::models::user::{User, UserRole};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User as exposed by the API (no credential material)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Global role
    pub role: UserRole,

    /// Avatar badge color
    pub avatar_color: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            avatar_color: user.avatar_color,
            created_at: user.created_at,
        }
    }
}

/// Lists all users, ordered by name
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = User::list(&state.db).await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
