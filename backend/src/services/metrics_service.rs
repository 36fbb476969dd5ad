//! Prometheus metrics collection and HTTP request instrumentation.

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{Request, Response},
    middleware::Next,
};

use crate::error::{AppError, Result};

/// Install the Prometheus recorder and return the handle for rendering.
pub fn init_metrics() -> Result<PrometheusHandle> {
    PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| AppError::Internal(format!("Failed to install Prometheus recorder: {}", e)))
}

/// Axum middleware that records HTTP request metrics.
///
/// Requests are labelled by matched route template so that candidate and
/// version path segments do not explode label cardinality.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let start = Instant::now();
    counter!("broker_http_requests_total", "method" => method.clone(), "path" => path.clone())
        .increment(1);
    gauge!("broker_http_requests_in_flight", "method" => method.clone(), "path" => path.clone())
        .increment(1.0);

    let response = next.run(request).await;

    let duration = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    histogram!("broker_http_request_duration_seconds", "method" => method.clone(), "path" => path.clone(), "status" => status.clone()).record(duration);
    counter!("broker_http_responses_total", "method" => method.clone(), "path" => path.clone(), "status" => status).increment(1);
    gauge!("broker_http_requests_in_flight", "method" => method, "path" => path).decrement(1.0);

    response
}

/// Record a download resolution by artifact kind and outcome.
pub fn record_download_resolution(kind: &str, outcome: &str) {
    counter!("broker_download_resolutions_total", "kind" => kind.to_string(), "outcome" => outcome.to_string()).increment(1);
}

/// Record an audit write that was dropped.
pub fn record_audit_failure() {
    counter!("broker_audit_failures_total").increment(1);
}

/// Record a health check verdict.
pub fn record_health_check(outcome: &str) {
    counter!("broker_health_checks_total", "outcome" => outcome.to_string()).increment(1);
}
