//! Service error type with HTTP status mapping.
//!
//! ERROR HANDLING
//! ==============
//! Every handler returns `Result<_, FeederError>`. The response body is
//! always `{"success": false, "error": "..."}` so the dashboard and devices
//! can report failures without inspecting status codes. Database and I/O
//! failures are logged here and surface to clients as 500s.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum FeederError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Invalid(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl FeederError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Classify a failed insert/update: key collisions become `Conflict`,
    /// dangling references become `Invalid`, anything else stays `Database`.
    #[must_use]
    pub fn from_write(err: sqlx::Error, what: &str) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                return Self::Conflict(format!("{what} already exists"));
            }
            if db.is_foreign_key_violation() {
                return Self::Invalid(format!("{what} references an unknown record"));
            }
            if db.is_check_violation() {
                return Self::Invalid(format!("{what} has an invalid value"));
            }
        }
        Self::Database(err)
    }

    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Invalid(_) => StatusCode::BAD_REQUEST,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Database(_) | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

impl IntoResponse for FeederError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
        }
        (status, Json(ErrorBody { success: false, error: self.to_string() })).into_response()
    }
}

/// `{"success": true}` for mutations with nothing else to report.
#[must_use]
pub fn ok() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "success": true }))
}
