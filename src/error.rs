//! Error types for Libris server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, "Authentication failed", msg.clone())
            }
            AppError::Authorization(msg) => (StatusCode::FORBIDDEN, "Unauthorized", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "Entity not found", msg.clone()),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "Validation failed", msg.clone())
            }
            AppError::InvalidState(msg) => (StatusCode::BAD_REQUEST, "Invalid state", msg.clone()),
            AppError::Conflict(msg) => {
                (StatusCode::CONFLICT, "Data integrity violation", msg.clone())
            }
            AppError::Database(e) => {
                // Constraint collisions the services did not pre-check (e.g.
                // concurrent inserts racing a uniqueness probe) are conflicts,
                // not server faults
                let is_integrity = e
                    .as_database_error()
                    .map(|db| db.is_unique_violation() || db.is_foreign_key_violation())
                    .unwrap_or(false);
                if is_integrity {
                    (
                        StatusCode::CONFLICT,
                        "Data integrity violation",
                        "Database operation failed due to data integrity constraints".to_string(),
                    )
                } else {
                    tracing::error!("Database error: {:?}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Database error",
                        "Database operation failed".to_string(),
                    )
                }
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| format!("{}: {}", field, m))
                        .unwrap_or_else(|| format!("{}: invalid value", field))
                })
            })
            .collect();
        AppError::Validation(messages.join("; "))
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
