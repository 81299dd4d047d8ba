//! Unified error handling for the API.
//!
//! All route handlers return `Result<T, AppError>`. Every error is converted
//! to the JSON envelope `{"success": false, "message": ...}` at the request
//! boundary; nothing is allowed to crash the process. Server errors are
//! captured to Sentry before responding.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database/repository operation failed.
    #[error("Database error: {0}")]
    Database(RepositoryError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Admin token missing or wrong.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client (missing field, invalid parent, bad value).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Unique constraint violation, naming the offending field and value.
    #[error("Conflict: a record with {field} \"{value}\" already exists")]
    Conflict { field: &'static str, value: String },

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Self::NotFound("Resource not found".to_string()),
            RepositoryError::Conflict { field, value } => Self::Conflict { field, value },
            RepositoryError::InvalidParent(msg) => Self::BadRequest(msg),
            RepositoryError::Slug(e) => Self::BadRequest(e.to_string()),
            err @ (RepositoryError::Database(_) | RepositoryError::DataCorruption(_)) => {
                Self::Database(err)
            }
        }
    }
}

/// JSON error body shared by all error responses.
#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Database(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            // Conflicts surface as 400 naming the field, matching the API contract
            Self::BadRequest(_) | Self::Conflict { .. } => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::Conflict { field, value } => {
                format!("A record with {field} \"{value}\" already exists")
            }
            Self::NotFound(msg) | Self::Unauthorized(msg) | Self::BadRequest(msg) => msg.clone(),
        };

        (
            status,
            Json(ErrorBody {
                success: false,
                message,
            }),
        )
            .into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use copperleaf_core::slug::SlugError;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("Brand not found".to_string());
        assert_eq!(err.to_string(), "Not found: Brand not found");

        let err = AppError::Conflict {
            field: "name",
            value: "Nike".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Conflict: a record with name \"Nike\" already exists"
        );
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Unauthorized("test".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Conflict {
                field: "slug",
                value: "nike".to_string()
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_repository_error_mapping() {
        assert_eq!(
            get_status(RepositoryError::NotFound.into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(
                RepositoryError::Conflict {
                    field: "name",
                    value: "Nike".to_string()
                }
                .into()
            ),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(RepositoryError::InvalidParent("parent brand 9 not found".to_string()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(RepositoryError::Slug(SlugError::Empty("🎉".to_string())).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(RepositoryError::DataCorruption("bad status".to_string()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
