//! Handlers for health check and service info endpoints.

use axum::{Json, extract::State};

use crate::api::dto::health::{HealthResponse, RootResponse};
use crate::state::AppState;

const SERVICE_NAME: &str = "propertyiq-api";

/// Reports liveness and whether upstream credentials are configured.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// Always **200 OK**; a missing API key is reported, not treated as failure.
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "propertyiq-api",
///   "attom_configured": true,
///   "version": "1.1.0"
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        attom_configured: state.property_service.is_configured(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Service banner.
///
/// # Endpoint
///
/// `GET /`
pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        message: "PropertyIQ API",
        version: env!("CARGO_PKG_VERSION"),
        health: "/health",
    })
}
