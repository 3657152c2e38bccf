/// Authorization rules
///
/// Pure role checks consumed by the API handlers. The rules are small and
/// global (no per-project membership):
///
/// - Project create/update/delete require manager or admin.
/// - Task edit/delete/status-change require manager+, or being the task's
///   assignee.
/// - Task creation and all reads are open to any authenticated user.
///
/// # Example
///
/// ```
/// use projectflow_shared::auth::authorization::require_project_manager;
/// use projectflow_shared::auth::middleware::AuthContext;
/// use projectflow_shared::models::user::UserRole;
/// use uuid::Uuid;
///
/// let auth = AuthContext::new(Uuid::new_v4(), UserRole::Collaborator);
/// assert!(require_project_manager(&auth).is_err());
/// ```

use uuid::Uuid;

use super::middleware::AuthContext;
use crate::models::user::UserRole;

/// Error type for authorization checks
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    /// Caller's role is below the required role
    #[error("Insufficient permissions: requires {required:?} or higher")]
    InsufficientRole {
        /// Minimum role that would have been accepted
        required: UserRole,
    },

    /// Caller is neither privileged nor the task's assignee
    #[error("Not authorized to modify this task")]
    NotTaskAssignee,
}

/// Requires a role of at least `required`
pub fn require_role(auth: &AuthContext, required: UserRole) -> Result<(), AuthzError> {
    if auth.role.has_permission(&required) {
        Ok(())
    } else {
        Err(AuthzError::InsufficientRole { required })
    }
}

/// Requires the caller to be allowed to manage projects (manager or admin)
pub fn require_project_manager(auth: &AuthContext) -> Result<(), AuthzError> {
    if auth.role.can_manage_projects() {
        Ok(())
    } else {
        Err(AuthzError::InsufficientRole {
            required: UserRole::Manager,
        })
    }
}

/// Requires the caller to be a manager+ or the task's assignee
///
/// `assignee_id` is the task's current assignee; an unassigned task can
/// only be modified by a manager or admin.
pub fn require_task_access(
    auth: &AuthContext,
    assignee_id: Option<Uuid>,
) -> Result<(), AuthzError> {
    if auth.role.can_manage_projects() {
        return Ok(());
    }

    if assignee_id == Some(auth.user_id) {
        return Ok(());
    }

    Err(AuthzError::NotTaskAssignee)
}
