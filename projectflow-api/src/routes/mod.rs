/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Authentication endpoints (register, login, refresh)
/// - `users`: User directory
/// - `projects`: Project CRUD
/// - `tasks`: Task CRUD and kanban status moves
/// - `dashboard`: Aggregated reports

pub mod health;
pub mod auth;
pub mod users;
pub mod projects;
pub mod tasks;
pub mod dashboard;

use crate::error::{ApiError, ValidationErrorDetail};

/// Maps validator errors to a 422 response with per-field details
pub(crate) fn validation_error(e: validator::ValidationErrors) -> ApiError {
    let errors: Vec<ValidationErrorDetail> = e
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| ValidationErrorDetail {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Validation failed".to_string()),
            })
        })
        .collect();
    ApiError::ValidationError(errors)
}
