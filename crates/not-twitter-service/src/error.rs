//! API error types and responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// API error type.
///
/// Every variant renders the failure envelope
/// `{"result": false, "error_type": ..., "error_message": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or unknown API key.
    #[error("{0}")]
    Unauthenticated(String),

    /// Known caller acting outside what it may do.
    #[error("{0}")]
    Forbidden(String),

    /// Referenced user, tweet, or media does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Malformed request.
    #[error("{0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// The `error_type` string sent to clients.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Unauthenticated(_) => "Authentication error",
            Self::Forbidden(_) => "Forbidden operation error",
            Self::NotFound(_) => "Not found error",
            Self::BadRequest(_) => "Bad request error",
            Self::Internal(_) => "Internal error",
        }
    }

    /// The HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    result: bool,
    error_type: &'static str,
    error_message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_type = self.error_type();

        let error_message = match self {
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                "An internal error occurred".to_string()
            }
            Self::Unauthenticated(msg)
            | Self::Forbidden(msg)
            | Self::NotFound(msg)
            | Self::BadRequest(msg) => msg,
        };

        let body = ErrorResponse {
            result: false,
            error_type,
            error_message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<not_twitter_store::StoreError> for ApiError {
    fn from(err: not_twitter_store::StoreError) -> Self {
        Self::Internal(err.to_string())
    }
}
