//! Error handling module
//!
//! Provides the unified error type and its mapping onto the JSON error envelope.

use crate::models::{ErrorResponse, PrettyJson};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Request failed local checks; the store was never contacted
    #[error("Validation error: {0}")]
    Validation(String),

    /// Request body exceeded the configured size limit
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// A single-resource lookup, update or delete matched no row
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any failure reported by the store or the pool, passed through verbatim
    #[error("Store error: {0}")]
    Store(String),
}

impl From<tokio_postgres::Error> for AppError {
    fn from(err: tokio_postgres::Error) -> Self {
        // Prefer the server's own message over the driver's "db error: ..." wrapper
        let message = match err.as_db_error() {
            Some(db_err) => db_err.message().to_string(),
            None => err.to_string(),
        };
        AppError::Store(message)
    }
}

impl From<deadpool_postgres::PoolError> for AppError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        AppError::Store(err.to_string())
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The text placed in the envelope's `message` field
    pub fn message(&self) -> &str {
        match self {
            AppError::Validation(msg)
            | AppError::PayloadTooLarge(msg)
            | AppError::NotFound(msg)
            | AppError::Store(msg) => msg,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Store(msg) = &self {
            error!("Store error: {}", msg);
        }

        let status = self.status_code();
        let body = PrettyJson(ErrorResponse::new(self.message()));

        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, AppError>;

/// Helper function to create a validation error
pub fn validation_error(msg: impl Into<String>) -> AppError {
    AppError::Validation(msg.into())
}

/// Helper function to create a not found error for a resource kind and raw id
pub fn not_found_error(resource: &str, id: impl std::fmt::Display) -> AppError {
    AppError::NotFound(format!("{} with id {} not found", resource, id))
}
