//! Data models and DTOs (Data Transfer Objects)
//!
//! Contains the entity rows, request payloads and the response envelope.

pub mod genre;
mod lenient;
pub mod movie;
pub mod review;
pub mod user;

// Re-export commonly used types
pub use genre::*;
pub use movie::*;
pub use review::*;
pub use user::*;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use validator::ValidationErrors;

/// Envelope status marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// `{status: "success", data}` for reads
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub status: Status,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            status: Status::Success,
            data,
        }
    }
}

/// `{status: "success", message, id}` for creations
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub status: Status,
    pub message: String,
    pub id: i32,
}

impl CreatedResponse {
    pub fn new(message: impl Into<String>, id: i32) -> Self {
        Self {
            status: Status::Success,
            message: message.into(),
            id,
        }
    }
}

/// Message-only response (updates and deletes)
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub status: Status,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            message: message.into(),
        }
    }
}

/// Error envelope
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: Status,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: message.into(),
        }
    }
}

/// JSON responder that pretty-prints with two-space indentation
#[derive(Debug, Clone, Copy, Default)]
pub struct PrettyJson<T>(pub T);

impl<T: Serialize> IntoResponse for PrettyJson<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec_pretty(&self.0) {
            Ok(bytes) => (
                [(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json; charset=utf-8"),
                )],
                bytes,
            )
                .into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"))],
                err.to_string(),
            )
                .into_response(),
        }
    }
}

/// Pick a human-readable message out of validator's error map
pub(crate) fn first_validation_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_envelope_shapes() {
        let data = serde_json::to_value(DataResponse::new(vec![1, 2])).unwrap();
        assert_eq!(data, serde_json::json!({"status": "success", "data": [1, 2]}));

        let created = serde_json::to_value(CreatedResponse::new("Genre created successfully", 7)).unwrap();
        assert_eq!(
            created,
            serde_json::json!({"status": "success", "message": "Genre created successfully", "id": 7})
        );

        let message = serde_json::to_value(MessageResponse::new("Movie deleted successfully")).unwrap();
        assert_eq!(
            message,
            serde_json::json!({"status": "success", "message": "Movie deleted successfully"})
        );
    }

    #[tokio::test]
    async fn test_pretty_json_uses_two_space_indent() {
        let response = PrettyJson(serde_json::json!({"info": "Movie API Backend"})).into_response();
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json; charset=utf-8"
        );

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(
            std::str::from_utf8(&bytes).unwrap(),
            "{\n  \"info\": \"Movie API Backend\"\n}"
        );
    }
}
