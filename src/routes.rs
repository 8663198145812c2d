//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`        - Service banner
//! - `GET  /health`  - Liveness and upstream configuration
//! - `/api/v1/*`     - REST API
//!
//! # Middleware
//!
//! - **Panic recovery** - Panics become a 500 JSON error
//! - **CORS** - Any origin
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, root_handler};
use crate::api::middleware::{cors, panic, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .nest("/api/v1", api::routes::api_routes())
        .with_state(state)
        .layer(panic::layer())
        .layer(cors::layer())
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
