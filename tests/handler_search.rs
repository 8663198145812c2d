mod common;

use axum::{Router, http::StatusCode, routing::get};
use axum_test::TestServer;
use common::StubProvider;
use propertyiq::api::handlers::search_handler;
use std::sync::Arc;

const PATH: &str = "/api/v1/properties/search/attom";

fn server(provider: Arc<StubProvider>) -> TestServer {
    let state = common::create_test_state(provider);
    let app = Router::new()
        .route(PATH, get(search_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_search_returns_limited_results() {
    let provider = Arc::new(StubProvider::configured(15));
    let server = server(provider.clone());

    let response = server
        .get(PATH)
        .add_query_param("city", "Austin")
        .add_query_param("state", "TX")
        .add_query_param("limit", 5)
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 5);

    for item in items {
        assert!(!item["id"].as_str().unwrap().is_empty());
        assert!(!item["address"].as_str().unwrap().is_empty());
        assert!(item["price"].is_number());
    }

    // Every mapped Austin ZIP is queried, regardless of limit.
    assert_eq!(provider.calls(), 10);
}

#[tokio::test]
async fn test_search_results_follow_zip_order() {
    let server = server(Arc::new(StubProvider::configured(1)));

    let response = server
        .get(PATH)
        .add_query_param("city", "austin")
        .add_query_param("state", "tx")
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 10);
    assert_eq!(items[0]["zip_code"], "78701");
    assert_eq!(items[9]["zip_code"], "78724");
    assert_eq!(items[0]["price"], 350000.0);
    assert_eq!(items[0]["property_type"], "single_family");
}

#[tokio::test]
async fn test_search_unsupported_city_skips_upstream() {
    let provider = Arc::new(StubProvider::configured(5));
    let server = server(provider.clone());

    let response = server
        .get(PATH)
        .add_query_param("city", "Boise")
        .add_query_param("state", "ID")
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>(), serde_json::json!([]));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_search_tolerates_upstream_failure() {
    let server = server(Arc::new(StubProvider::failing()));

    let response = server
        .get(PATH)
        .add_query_param("city", "Dallas")
        .add_query_param("state", "TX")
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>(), serde_json::json!([]));
}

#[tokio::test]
async fn test_search_skips_single_failing_zip() {
    let mut provider = StubProvider::configured(2);
    provider.failing_zips.insert("78701".to_string());
    let server = server(Arc::new(provider));

    let response = server
        .get(PATH)
        .add_query_param("city", "Austin")
        .add_query_param("state", "TX")
        .add_query_param("limit", 100)
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 18);
    assert_eq!(items[0]["zip_code"], "78702");
}

#[tokio::test]
async fn test_search_missing_city_is_bad_request() {
    let server = server(Arc::new(StubProvider::configured(1)));

    let response = server.get(PATH).add_query_param("state", "TX").await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert!(json["error"]["details"].get("city").is_some());
}

#[tokio::test]
async fn test_search_limit_out_of_range() {
    let server = server(Arc::new(StubProvider::configured(1)));

    for limit in ["0", "101"] {
        let response = server
            .get(PATH)
            .add_query_param("city", "Austin")
            .add_query_param("state", "TX")
            .add_query_param("limit", limit)
            .await;

        response.assert_status_bad_request();
    }
}

#[tokio::test]
async fn test_search_non_numeric_limit() {
    let server = server(Arc::new(StubProvider::configured(1)));

    let response = server
        .get(PATH)
        .add_query_param("city", "Austin")
        .add_query_param("state", "TX")
        .add_query_param("limit", "lots")
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "validation_error"
    );
}

#[tokio::test]
async fn test_search_without_api_key_is_unavailable() {
    let server = server(Arc::new(StubProvider::unconfigured()));

    let response = server
        .get(PATH)
        .add_query_param("city", "Austin")
        .add_query_param("state", "TX")
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "upstream_unavailable"
    );
}
