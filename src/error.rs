//! Unified error types for the demo service.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Process-level error: anything that stops the service from starting.
#[derive(Error, Debug)]
pub enum DemoError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Metrics exporter could not be installed.
    #[error("metrics exporter error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Request-level error, rendered as a JSON body at the dispatch boundary.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No route matches the request path.
    #[error("not found")]
    NotFound,

    /// The path matches a route that does not accept the method.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// Host name could not be resolved or is not valid UTF-8.
    #[error("hostname lookup failed: {0}")]
    Hostname(#[from] std::io::Error),

    /// Wall-clock time could not be formatted.
    #[error("timestamp formatting failed: {0}")]
    Timestamp(#[from] time::error::Format),

    /// Any other unexpected failure, including handler panics.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error body: `{"error": ..., "status": ...}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Client-facing error message.
    pub error: &'static str,
    /// HTTP status code, repeated in the body.
    pub status: u16,
}

impl ApiError {
    /// Status code and client-facing message for this error.
    pub fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not found"),
            ApiError::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed"),
            ApiError::Hostname(_) | ApiError::Timestamp(_) | ApiError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = ErrorResponse {
            error: message,
            status: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, DemoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let (status, message) = ApiError::NotFound.status_and_message();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(message, "Not found");
    }

    #[test]
    fn internal_causes_are_hidden_from_clients() {
        let err = ApiError::Hostname(std::io::Error::other("uname failed"));
        let (status, message) = err.status_and_message();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Internal server error");
    }

    #[test]
    fn error_response_carries_json_content_type() {
        let response = ApiError::MethodNotAllowed.into_response();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
    }
}
