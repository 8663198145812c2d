mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use common::StubProvider;
use propertyiq::api::handlers::{health_handler, root_handler};
use std::sync::Arc;

#[tokio::test]
async fn test_health_reports_configured_upstream() {
    let state = common::create_test_state(Arc::new(StubProvider::configured(1)));
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "propertyiq-api");
    assert_eq!(json["attom_configured"], true);
    assert!(json.get("version").is_some());
}

#[tokio::test]
async fn test_health_is_ok_without_api_key() {
    let state = common::create_test_state(Arc::new(StubProvider::unconfigured()));
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["attom_configured"], false);
}

#[tokio::test]
async fn test_root_banner() {
    let app = Router::new().route("/", get(root_handler));

    let server = TestServer::new(app).unwrap();

    let response = server.get("/").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["health"], "/health");
    assert!(json["message"].is_string());
}
