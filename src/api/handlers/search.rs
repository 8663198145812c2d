//! Handler for city property search.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::property::SearchParams;
use crate::domain::property::NormalizedProperty;
use crate::error::AppError;
use crate::state::AppState;

/// Searches a supported city by fanning out over its ZIP codes.
///
/// # Endpoint
///
/// `GET /api/v1/properties/search/attom?city=Austin&state=TX&limit=20`
///
/// # Query Parameters
///
/// - `city` (required): City name, matched case-insensitively
/// - `state` (required): Two-letter state code
/// - `limit` (optional): Maximum results, 1-100 (default: 20)
///
/// # Response
///
/// A JSON array of normalized properties. Unsupported cities and upstream
/// failures both produce `[]`.
///
/// # Errors
///
/// - **400 Bad Request**: Missing or invalid query parameters
/// - **503 Service Unavailable**: Upstream API key not configured
pub async fn search_handler(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<NormalizedProperty>>, AppError> {
    let Query(params) = params.map_err(|e| {
        AppError::bad_request("Invalid query parameters", json!({ "reason": e.body_text() }))
    })?;

    params.validate()?;

    let limit = params.limit();
    let (Some(city), Some(state_code)) = (params.city, params.state) else {
        return Err(AppError::bad_request("city and state are required", json!({})));
    };

    let properties = state
        .property_service
        .search(&city, &state_code, limit)
        .await?;

    Ok(Json(properties))
}
