//! Listing verification and market summary figures.

use std::sync::Arc;

use crate::domain::city_zips::CityZipTable;
use crate::domain::metrics::{Assumptions, InvestmentMetrics};

const DEFAULT_CITY: &str = "Austin";
const DEFAULT_STATE: &str = "TX";

/// Outcome of verifying a listing.
#[derive(Debug, Clone, PartialEq)]
pub enum Verification {
    /// Required fields were missing; nothing was computed.
    Invalid { missing: Vec<&'static str> },
    Valid {
        confidence_score: f64,
        data_quality: &'static str,
        metrics: InvestmentMetrics,
    },
}

/// Summary figures for a market.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSnapshot {
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

/// Stateless arithmetic over listing inputs and the configured city table.
pub struct AnalysisService {
    assumptions: Assumptions,
    city_zips: Arc<CityZipTable>,
}

impl AnalysisService {
    pub fn new(assumptions: Assumptions, city_zips: Arc<CityZipTable>) -> Self {
        Self {
            assumptions,
            city_zips,
        }
    }

    /// Checks the required address fields and computes investment metrics.
    ///
    /// Blank strings count as missing. A missing list price is not an error;
    /// metrics are computed against zero and confidence drops.
    pub fn verify(
        &self,
        address: Option<&str>,
        city: Option<&str>,
        state: Option<&str>,
        list_price: Option<f64>,
    ) -> Verification {
        let missing: Vec<&'static str> = [("address", address), ("city", city), ("state", state)]
            .into_iter()
            .filter(|(_, value)| value.is_none_or(|v| v.trim().is_empty()))
            .map(|(name, _)| name)
            .collect();

        if !missing.is_empty() {
            return Verification::Invalid { missing };
        }

        let priced = list_price.is_some_and(|p| p.is_finite() && p > 0.0);

        Verification::Valid {
            confidence_score: if priced { 0.85 } else { 0.6 },
            data_quality: if priced { "good" } else { "partial" },
            metrics: InvestmentMetrics::compute(list_price.unwrap_or(0.0), &self.assumptions),
        }
    }

    /// Market summary for a city, defaulting to Austin, TX.
    pub fn market_snapshot(&self, city: Option<&str>, state: Option<&str>) -> MarketSnapshot {
        let city = city
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CITY);
        let state = state
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_STATE);

        MarketSnapshot {
            supported_zip_codes: self.city_zips.resolve(city, state).len(),
            city: city.to_string(),
            state: state.to_uppercase(),
            average_price: 450_000.0,
            median_price: 425_000.0,
            total_properties: 1250,
            price_per_sqft: 180.0,
            market_trend: "stable",
            last_updated: "2024-01-01T00:00:00Z",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AnalysisService {
        AnalysisService::new(Assumptions::default(), Arc::new(CityZipTable::default()))
    }

    #[test]
    fn test_verify_reports_missing_fields() {
        let result = service().verify(Some("1 Main St"), None, Some("  "), Some(1.0));
        assert_eq!(
            result,
            Verification::Invalid {
                missing: vec!["city", "state"]
            }
        );
    }

    #[test]
    fn test_verify_computes_metrics() {
        let result = service().verify(Some("1 Main St"), Some("Austin"), Some("TX"), Some(450_000.0));

        let Verification::Valid {
            confidence_score,
            data_quality,
            metrics,
        } = result
        else {
            panic!("expected a valid verification");
        };

        assert_eq!(confidence_score, 0.85);
        assert_eq!(data_quality, "good");
        assert!((metrics.cap_rate.unwrap() - 0.072).abs() < 1e-9);
        assert!((metrics.cash_on_cash_return.unwrap() - 0.144).abs() < 1e-9);
    }

    #[test]
    fn test_verify_without_price_is_partial() {
        let result = service().verify(Some("1 Main St"), Some("Austin"), Some("TX"), None);
        assert!(matches!(
            result,
            Verification::Valid {
                data_quality: "partial",
                ..
            }
        ));
    }

    #[test]
    fn test_market_snapshot_defaults() {
        let snapshot = service().market_snapshot(None, Some(""));
        assert_eq!(snapshot.city, "Austin");
        assert_eq!(snapshot.state, "TX");
        assert_eq!(snapshot.supported_zip_codes, 10);
        assert_eq!(snapshot.average_price, 450_000.0);
    }

    #[test]
    fn test_market_snapshot_unmapped_city() {
        let snapshot = service().market_snapshot(Some("Boise"), Some("id"));
        assert_eq!(snapshot.city, "Boise");
        assert_eq!(snapshot.state, "ID");
        assert_eq!(snapshot.supported_zip_codes, 0);
    }
}
