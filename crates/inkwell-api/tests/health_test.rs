//! Integration tests for the health endpoint.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use inkwell_test_support::{FailingSceneSource, StaticSceneSource, sample_rows};

#[tokio::test]
async fn test_health_returns_200_with_status_ok() {
    let app = common::TestApp::new(Arc::new(StaticSceneSource::new(sample_rows())));
    app.start().await;

    let (status, json) = common::get_json(app.router(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["session"], "ready");
}

#[tokio::test]
async fn test_health_stays_ok_when_session_faulted() {
    let app = common::TestApp::new(Arc::new(FailingSceneSource));
    app.start().await;

    let (status, json) = common::get_json(app.router(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["session"], "faulted");
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let app = common::TestApp::new(Arc::new(StaticSceneSource::new(sample_rows())));

    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/api/v1/nonexistent")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(app.router(), request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
