//! HTTP API route definitions.

use axum::{
    middleware,
    routing::{get, post, MethodRouter},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use super::handlers::{
    echo, handle_panic, health, info, method_not_allowed, not_found, ready, root, AppState,
};
use crate::metrics::track_requests;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    with_dispatch_layers(api_routes().with_state(state))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", json_only(get(root)))
        // Health endpoints
        .route("/health", json_only(get(health)))
        .route("/ready", json_only(get(ready)))
        // Informational endpoints
        .route("/api/info", json_only(get(info)))
        .route("/api/echo", json_only(post(echo)))
}

/// Answer unsupported methods on a known path with a JSON 405.
fn json_only(route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route.fallback(method_not_allowed)
}

/// Wrap a router with the dispatch boundary: JSON 404 fallback, panic
/// recovery, metrics and request tracing.
///
/// Panics are caught innermost so metrics and traces see the 500.
pub fn with_dispatch_layers(router: Router) -> Router {
    router
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(track_requests))
        .layer(TraceLayer::new_for_http())
}
