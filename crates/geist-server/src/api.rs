//! Shared response writing for the Geist API.

use axum::{
    extract::Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use geist_users::{UserError, ValidationError};
use thiserror::Error;

/// Message returned for lookups that match no row.
pub const NOT_FOUND_MESSAGE: &str = "not found";

/// API error type mapping to HTTP status codes.
///
/// Every variant renders as `{"error": <message>}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("internal server error: {0}")]
    InternalServerError(String),
}

impl ApiError {
    /// 404 carrying the fixed `not found` message.
    pub fn not_found() -> Self {
        ApiError::NotFound(NOT_FOUND_MESSAGE.to_string())
    }

    /// HTTP status this error is rendered with.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::InternalServerError(msg) => msg,
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

/// `NotFound` → 404, everything else → 500 with the store's message.
impl From<UserError> for ApiError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::NotFound(_) => ApiError::not_found(),
            err => {
                tracing::error!(error = %err, "user store operation failed");
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        tracing::error!(error = %e, "blocking task join error");
        ApiError::InternalServerError(format!("task join error: {}", e))
    }
}
