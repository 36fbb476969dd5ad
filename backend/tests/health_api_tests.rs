//! Router-level tests for the liveness, metrics and OpenAPI endpoints.

mod common;

use axum::http::StatusCode;

use common::{body_json, TestApp};
use download_broker_backend::storage::StoreError;

#[tokio::test]
async fn test_both_stores_up() {
    let app = TestApp::new();

    for path in ["/meta/alive", "/health", "/healthz"] {
        let response = app.get(path).await;
        assert_eq!(response.status(), StatusCode::OK, "{path}");

        let body = body_json(response).await;
        assert_eq!(body["status"], "UP");
        assert_eq!(body["checks"]["mongodb"]["status"], "UP");
        assert_eq!(body["checks"]["postgres"]["status"], "UP");
    }
}

#[tokio::test]
async fn test_application_record_not_ok() {
    let app = TestApp::new();
    app.primary.set(Ok(vec!["NOT_OK".to_string()])).await;

    let response = app.get("/meta/alive").await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["status"], "DOWN");
    assert_eq!(body["checks"]["mongodb"]["cause"], "INVALID_APPLICATION_STATE");
    assert_eq!(body["checks"]["postgres"]["status"], "UP");
}

#[tokio::test]
async fn test_missing_and_unreachable_primary_are_distinct() {
    let app = TestApp::new();

    app.primary.set(Ok(Vec::new())).await;
    let missing = body_json(app.get("/meta/alive").await).await;
    assert_eq!(
        missing["checks"]["mongodb"]["cause"],
        "APPLICATION_RECORD_MISSING"
    );

    app.primary
        .set(Err(StoreError::Connection("no servers".to_string())))
        .await;
    let unreachable = body_json(app.get("/meta/alive").await).await;
    assert_eq!(
        unreachable["checks"]["mongodb"]["cause"],
        "CONNECTION_FAILURE"
    );
}

#[tokio::test]
async fn test_secondary_query_failure() {
    let app = TestApp::new();
    app.secondary
        .set(Err(StoreError::Query("relation does not exist".to_string())))
        .await;

    let response = app.get("/health").await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["checks"]["mongodb"]["status"], "UP");
    assert_eq!(body["checks"]["postgres"]["status"], "DOWN");
    assert_eq!(body["checks"]["postgres"]["cause"], "QUERY_FAILURE");
}

#[tokio::test]
async fn test_both_down() {
    let app = TestApp::new();
    app.primary
        .set(Err(StoreError::Connection("no servers".to_string())))
        .await;
    app.secondary
        .set(Err(StoreError::Connection("refused".to_string())))
        .await;

    let response = app.get("/healthz").await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["checks"]["mongodb"]["status"], "DOWN");
    assert_eq!(body["checks"]["postgres"]["status"], "DOWN");
}

#[tokio::test]
async fn test_metrics_without_recorder() {
    let app = TestApp::new();

    let response = app.get("/metrics").await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_openapi_document() {
    let app = TestApp::new();

    let response = app.get("/api-docs/openapi.json").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["info"]["title"], "Download Broker API");
    assert!(body["paths"]["/meta/alive"].is_object());
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = TestApp::new();

    let response = app.get("/download/java/17").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
