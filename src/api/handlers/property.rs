//! Handler for single property detail.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::domain::property::NormalizedProperty;
use crate::error::AppError;
use crate::state::AppState;

/// Fetches one property by its upstream identifier.
///
/// # Endpoint
///
/// `GET /api/v1/properties/{id}`
///
/// # Errors
///
/// - **404 Not Found**: The upstream has no such property or the lookup failed
/// - **503 Service Unavailable**: Upstream API key not configured
pub async fn property_detail_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<NormalizedProperty>, AppError> {
    let property = state.property_service.get_property(&id).await?;
    Ok(Json(property))
}
