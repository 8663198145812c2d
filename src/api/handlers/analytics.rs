//! Handler for market analytics.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::dto::analytics::{AnalyticsParams, AnalyticsResponse};
use crate::state::AppState;

/// Returns summary figures for a market.
///
/// # Endpoint
///
/// `GET /api/v1/market/analytics?city=Austin&state=TX`
///
/// Both parameters are optional and default to Austin, TX.
pub async fn analytics_handler(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> Json<AnalyticsResponse> {
    let snapshot = state
        .analysis_service
        .market_snapshot(params.city.as_deref(), params.state.as_deref());

    Json(snapshot.into())
}
