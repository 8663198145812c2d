//! DTOs for health check and service info endpoints.

use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub attom_configured: bool,
    pub version: &'static str,
}

/// Landing response for `GET /`.
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub health: &'static str,
}
