//! HTTP API handlers.

use std::any::Any;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::ApiError;
use crate::utils::{hostname, now_timestamp};

/// Application name reported by `/api/info`.
pub const APPLICATION_NAME: &str = "devops-demo";

/// Greeting returned by `/`.
pub const WELCOME_MESSAGE: &str = "Welcome to DevOps Demo Project! 🚀";

/// Application state shared with handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Immutable configuration, read once at startup.
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new app state.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Version reported by the endpoints.
    pub fn version(&self) -> &str {
        &self.config.app_version
    }
}

/// Root response.
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub version: String,
    pub hostname: String,
    pub timestamp: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "healthy".
    pub status: &'static str,
    pub version: String,
    pub timestamp: String,
}

/// Readiness check response.
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    /// Status: "ready".
    pub status: &'static str,
    pub version: String,
}

/// Application information response.
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub application: &'static str,
    pub version: String,
    pub hostname: String,
    pub environment: String,
    pub timestamp: String,
}

/// Echo response.
#[derive(Debug, Serialize)]
pub struct EchoResponse {
    /// The request body, or `{}` when it was absent or unparseable.
    pub received: Value,
    pub timestamp: String,
}

/// Root handler - greeting plus host identity.
pub async fn root(State(state): State<AppState>) -> Result<Json<RootResponse>, ApiError> {
    Ok(Json(RootResponse {
        message: WELCOME_MESSAGE,
        version: state.version().to_owned(),
        hostname: hostname()?,
        timestamp: now_timestamp()?,
    }))
}

/// Liveness probe - always healthy while the process can answer.
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    Ok(Json(HealthResponse {
        status: "healthy",
        version: state.version().to_owned(),
        timestamp: now_timestamp()?,
    }))
}

/// Readiness probe - the service has no dependencies to wait for.
pub async fn ready(State(state): State<AppState>) -> Json<ReadyResponse> {
    Json(ReadyResponse {
        status: "ready",
        version: state.version().to_owned(),
    })
}

/// Application information handler.
pub async fn info(State(state): State<AppState>) -> Result<Json<InfoResponse>, ApiError> {
    Ok(Json(InfoResponse {
        application: APPLICATION_NAME,
        version: state.version().to_owned(),
        hostname: hostname()?,
        environment: state.config.environment.clone(),
        timestamp: now_timestamp()?,
    }))
}

/// Echo handler - returns the posted JSON under `received`.
///
/// Parsing is lenient: an unreadable, empty or malformed body echoes as `{}`
/// instead of failing the request. A literal `null` counts as an absent body
/// and also echoes as `{}`; every other JSON value, including `[]`, `false`,
/// `0` and `""`, is returned unmodified.
pub async fn echo(body: Result<Bytes, BytesRejection>) -> Result<Json<EchoResponse>, ApiError> {
    let received = match body {
        Ok(bytes) => parse_echo_body(&bytes),
        Err(rejection) => {
            warn!(error = %rejection, "Echo body could not be read");
            empty_object()
        }
    };

    Ok(Json(EchoResponse {
        received,
        timestamp: now_timestamp()?,
    }))
}

/// Parse an echo body, substituting `{}` for anything that is not JSON.
pub fn parse_echo_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return empty_object();
    }

    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Null) => empty_object(),
        Ok(value) => value,
        Err(e) => {
            debug!(error = %e, "Echo body is not valid JSON");
            empty_object()
        }
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// Fallback for paths that match no route.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Fallback for known paths requested with an unsupported method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Convert a caught handler panic into the JSON 500 response.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ApiError::Internal(format!("handler panicked: {detail}")).into_response()
}
