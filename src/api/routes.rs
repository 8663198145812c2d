//! API route configuration.
//!
//! Mounted under `/api/v1` by [`crate::routes::app_router`].

use crate::api::handlers::{
    analytics_handler, property_detail_handler, search_handler, verify_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Versioned API routes.
///
/// # Endpoints
///
/// - `GET  /properties/search/attom` - Search a city by ZIP fan-out
/// - `POST /properties/verify`       - Verify a listing and compute metrics
/// - `GET  /properties/{id}`         - Single property detail
/// - `GET  /market/analytics`        - Market summary figures
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/properties/search/attom", get(search_handler))
        .route("/properties/verify", post(verify_handler))
        .route("/properties/{id}", get(property_detail_handler))
        .route("/market/analytics", get(analytics_handler))
}
