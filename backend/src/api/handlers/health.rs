//! Health and metrics endpoints.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::api::SharedState;
use crate::models::health::{HealthCause, HealthOutcome, StoreStatus};

#[derive(OpenApi)]
#[openapi(
    paths(health_check),
    components(schemas(HealthResponse, HealthChecks, CheckStatus, StoreStatus))
)]
pub struct HealthApiDoc;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: StoreStatus,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthChecks {
    pub mongodb: CheckStatus,
    pub postgres: CheckStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckStatus {
    pub status: StoreStatus,
    /// Machine-readable failure kind, e.g. `CONNECTION_FAILURE`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl CheckStatus {
    fn from_cause(cause: Option<&HealthCause>) -> Self {
        match cause {
            None => Self {
                status: StoreStatus::Up,
                cause: None,
                reason: None,
            },
            Some(cause) => Self {
                status: StoreStatus::Down,
                cause: Some(cause.code().to_string()),
                reason: Some(cause.to_string()),
            },
        }
    }
}

impl From<&HealthOutcome> for HealthResponse {
    fn from(outcome: &HealthOutcome) -> Self {
        let status = if outcome.is_up() {
            StoreStatus::Up
        } else {
            StoreStatus::Down
        };

        Self {
            status,
            checks: HealthChecks {
                mongodb: CheckStatus::from_cause(outcome.primary_cause()),
                postgres: CheckStatus::from_cause(outcome.secondary_cause()),
            },
        }
    }
}

/// Liveness of both backing stores.
///
/// Also mounted at `/health` and `/healthz`.
#[utoipa::path(
    get,
    path = "/meta/alive",
    tag = "health",
    responses(
        (status = 200, description = "Both stores are up", body = HealthResponse),
        (status = 503, description = "At least one store is down", body = HealthResponse),
    )
)]
pub async fn health_check(State(state): State<SharedState>) -> impl IntoResponse {
    let outcome = state.health_service.check_health().await;

    let status_code = if outcome.is_up() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(HealthResponse::from(&outcome)))
}

/// Prometheus metrics endpoint
pub async fn metrics(State(state): State<SharedState>) -> impl IntoResponse {
    match &state.metrics_handle {
        Some(handle) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            handle.render(),
        ),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            [("content-type", "text/plain; charset=utf-8")],
            "metrics recorder not installed\n".to_string(),
        ),
    }
}
