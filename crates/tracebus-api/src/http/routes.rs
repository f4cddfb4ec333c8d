//! HTTP route definitions.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Create the router.
///
/// ## Route Structure
///
/// ```text
/// /v1
///   GET    /v1/resource-types                           - List resource types
///   GET    /v1/resource-types/{type}                    - List resources of a type
///   GET    /v1/resources/{type}/{name}/config           - Static config
///   GET    /v1/resources/{type}/{name}/trace            - Runtime trace
///   POST   /v1/resources/{type}/{name}/execute          - Run a command (NDJSON stream)
///   GET    /v1/resource-mapping                         - Pod-to-resource mapping
///
/// /livez - Liveness probe
/// ```
pub fn create_router(state: Arc<AppState>) -> Router {
    let v1 = Router::new()
        .route("/resource-types", get(handlers::list_resource_types))
        .route("/resource-types/{resource_type}", get(handlers::list_resources))
        .route(
            "/resources/{resource_type}/{name}/config",
            get(handlers::get_resource_config),
        )
        .route(
            "/resources/{resource_type}/{name}/trace",
            get(handlers::get_resource_trace),
        )
        .route(
            "/resources/{resource_type}/{name}/execute",
            post(handlers::execute_resource),
        )
        .route("/resource-mapping", get(handlers::get_resource_mapping));

    Router::new()
        .nest("/v1", v1)
        .route("/livez", get(handlers::liveness))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
