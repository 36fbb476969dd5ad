//! Route definitions for the API.

use axum::{middleware, routing::get, Router};

use super::handlers;
use super::middleware::tracing::correlation_id_middleware;
use super::SharedState;
use crate::services::metrics_service::metrics_middleware;

/// Create the main API router
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        // Liveness of both backing stores
        .route("/meta/alive", get(handlers::health::health_check))
        .route("/health", get(handlers::health::health_check))
        .route("/healthz", get(handlers::health::health_check))
        .route("/metrics", get(handlers::health::metrics))
        .route("/api-docs/openapi.json", get(super::openapi::openapi_json))
        .nest("/download", download_routes())
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(correlation_id_middleware))
        .with_state(state)
}

/// The static `cli` and `native` segments take priority over `:candidate`,
/// so candidates with those names are not reachable.
fn download_routes() -> Router<SharedState> {
    Router::new()
        .route(
            "/cli/:command/:version/:platform",
            get(handlers::cli::download_cli),
        )
        .route(
            "/native/:command/:version/:platform",
            get(handlers::cli::download_native),
        )
        .route(
            "/:candidate/:version/:platform",
            get(handlers::download::download_version),
        )
}
