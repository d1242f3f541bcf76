//! API error types
//!
//! Every handler returns `ApiResult<T>`; `ApiError` maps the internal error
//! taxonomy onto HTTP statuses with a JSON body. Storage and upstream
//! internals are logged server-side and never leak raw into responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::spotify::SpotifyError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request body or parameter (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Conflict (409) - duplicate email or slug
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Upstream catalog/AI failure; passes the upstream status through
    #[error("Upstream error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Database error (500, details logged only)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// Shared library error
    #[error("Common error: {0}")]
    Common(#[from] sweepcast_common::Error),
}

impl From<SpotifyError> for ApiError {
    fn from(err: SpotifyError) -> Self {
        match err {
            SpotifyError::Api { status, message } => ApiError::Upstream { status, message },
            SpotifyError::MissingCredentials => ApiError::Upstream {
                status: 503,
                message: "Catalog credentials are not configured".to_string(),
            },
            other => ApiError::Upstream {
                status: 500,
                message: other.to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
            ApiError::Upstream { status, message } => {
                let status = StatusCode::from_u16(status)
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, "UPSTREAM_ERROR", message)
            }
            ApiError::Database(ref err) => {
                tracing::error!("Database error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
            ApiError::Common(ref err) => {
                tracing::error!("Error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Map a sqlx error to Conflict when it is a UNIQUE constraint violation,
/// otherwise pass it through as a database error.
pub fn conflict_on_unique(err: sqlx::Error, conflict_message: &str) -> ApiError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.message().contains("UNIQUE constraint failed") => {
            ApiError::Conflict(conflict_message.to_string())
        }
        _ => ApiError::Database(err),
    }
}
