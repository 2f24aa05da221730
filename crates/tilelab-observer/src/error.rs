//! Error types for the serving layer.
//!
//! [`ApiError`] unifies all handler failure modes into a single enum
//! that converts into an HTTP response. Malformed payloads never reach
//! this type -- they coerce to empty snapshots by design -- so the
//! variants cover resource lookups and solver availability only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors that can occur in the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The solver did not answer within the per-request ceiling.
    #[error("solver timed out")]
    SolverTimeout,

    /// The solver worker is gone; the request queue is closed.
    #[error("solver unavailable")]
    SolverUnavailable,

    /// A serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::SolverTimeout | Self::SolverUnavailable | Self::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = serde_json::json!({
            "ok": false,
            "error": self.to_string(),
        });

        (status, axum::Json(body)).into_response()
    }
}
