//! 健康检查 API 集成测试

use axum::{
    body::Body,
    http::{Request, StatusCode},
};

mod common;
use common::{create_test_app, send};

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let (status, json) = send(&app, Request::builder().uri("/health").body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert!(json["uptime_secs"].is_number());
}

#[tokio::test]
async fn test_readiness_endpoint() {
    let app = create_test_app();

    let (status, json) = send(&app, Request::builder().uri("/ready").body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ready"], true);
    assert_eq!(json["checks"][0]["name"], "database");
    assert_eq!(json["checks"][0]["status"], "healthy");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = create_test_app();

    let (status, _) = send(&app, Request::builder().uri("/api/nope").body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
