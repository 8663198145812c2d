//! DTOs for the market analytics endpoint.

use serde::{Deserialize, Serialize};

use crate::application::services::MarketSnapshot;

/// Optional filters for `GET /api/v1/market/analytics`.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsParams {
    pub city: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub city: String,
    pub state: String,
    pub average_price: f64,
    pub median_price: f64,
    pub total_properties: u64,
    pub price_per_sqft: f64,
    pub market_trend: &'static str,
    pub supported_zip_codes: usize,
    pub last_updated: &'static str,
}

impl From<MarketSnapshot> for AnalyticsResponse {
    fn from(s: MarketSnapshot) -> Self {
        Self {
            city: s.city,
            state: s.state,
            average_price: s.average_price,
            median_price: s.median_price,
            total_properties: s.total_properties,
            price_per_sqft: s.price_per_sqft,
            market_trend: s.market_trend,
            supported_zip_codes: s.supported_zip_codes,
            last_updated: s.last_updated,
        }
    }
}
