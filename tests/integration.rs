//! End-to-end tests for the HTTP API.
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot`; no
//! socket is opened.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tower::ServiceExt;

use devops_demo::api::{create_router, AppState};
use devops_demo::config::Config;

/// Build a router from explicit environment pairs.
fn app_with_env(pairs: &[(&str, &str)]) -> Router {
    let vars = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()));
    let config = Config::from_vars(vars).expect("test config should parse");
    create_router(AppState::new(config))
}

fn app() -> Router {
    app_with_env(&[])
}

/// Send a request and return status plus parsed JSON body.
async fn send(app: Router, method: Method, uri: &str, body: Body) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();

    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json",
        "every response must be JSON"
    );

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, Body::empty()).await
}

fn assert_timestamp(body: &Value) {
    let stamp = body["timestamp"].as_str().expect("timestamp is a string");
    assert!(
        OffsetDateTime::parse(stamp, &Rfc3339).is_ok(),
        "timestamp {stamp} is not RFC 3339"
    );
}

#[tokio::test]
async fn root_returns_greeting_and_identity() {
    let (status, body) = get(app(), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to DevOps Demo Project! 🚀");
    assert_eq!(body["version"], "1.0.0");
    assert!(!body["hostname"].as_str().unwrap().is_empty());
    assert_timestamp(&body);
}

#[tokio::test]
async fn health_is_always_healthy() {
    let (status, body) = get(app_with_env(&[("ENVIRONMENT", "staging")]), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], "1.0.0");
    assert_timestamp(&body);
}

#[tokio::test]
async fn ready_reports_ready() {
    let (status, body) = get(app(), "/ready").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ready", "version": "1.0.0"}));
}

#[tokio::test]
async fn info_reports_application_and_environment() {
    let (status, body) = get(app(), "/api/info").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["application"], "devops-demo");
    assert_eq!(body["version"], "1.0.0");
    assert_eq!(body["environment"], "development");
    assert!(body["hostname"].is_string());
    assert_timestamp(&body);
}

#[tokio::test]
async fn echo_returns_posted_object() {
    let payload = json!({"message": "test", "value": 123});
    let (status, body) = send(
        app(),
        Method::POST,
        "/api/echo",
        Body::from(payload.to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["received"], payload);
    assert_timestamp(&body);
}

#[tokio::test]
async fn echo_without_body_returns_empty_object() {
    let (status, body) = send(app(), Method::POST, "/api/echo", Body::empty()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["received"], json!({}));
}

#[tokio::test]
async fn echo_with_invalid_json_returns_empty_object() {
    let (status, body) = send(app(), Method::POST, "/api/echo", Body::from("{oops")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["received"], json!({}));
}

#[tokio::test]
async fn unknown_route_returns_not_found() {
    let (status, body) = get(app(), "/nonexistent").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Not found", "status": 404}));
}

#[tokio::test]
async fn wrong_method_returns_method_not_allowed() {
    let (status, body) = send(app(), Method::DELETE, "/health", Body::empty()).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, json!({"error": "Method not allowed", "status": 405}));
}

#[tokio::test]
async fn app_version_flows_into_every_versioned_endpoint() {
    let env = [("APP_VERSION", "2.3.1"), ("ENVIRONMENT", "production")];

    for uri in ["/", "/health", "/ready", "/api/info"] {
        let (status, body) = get(app_with_env(&env), uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body["version"], "2.3.1", "{uri}");
    }

    let (_, info) = get(app_with_env(&env), "/api/info").await;
    assert_eq!(info["environment"], "production");
}

#[tokio::test]
async fn empty_app_version_and_environment_are_served_verbatim() {
    let env = [("APP_VERSION", ""), ("ENVIRONMENT", "")];

    let (status, body) = get(app_with_env(&env), "/api/info").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], "");
    assert_eq!(body["environment"], "");
}
