//! DTOs for the listing verification endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};

use crate::domain::metrics::InvestmentMetrics;

/// Request body for `POST /api/v1/properties/verify`.
///
/// `list_price` accepts either a JSON number or a numeric string.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    #[serde(default)]
    pub address: Option<String>,

    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub state: Option<String>,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub list_price: Option<f64>,
}

/// Verification outcome.
///
/// Uses untagged enum so both shapes carry `is_valid` at the top level.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum VerifyResponse {
    Valid {
        is_valid: bool,
        verification: VerificationSummary,
        metrics: InvestmentMetrics,
        calculated_at: DateTime<Utc>,
    },
    Invalid {
        is_valid: bool,
        issues: String,
    },
}

/// Confidence block of a successful verification.
#[derive(Debug, Serialize)]
pub struct VerificationSummary {
    pub address_verified: bool,
    pub data_quality: &'static str,
    pub confidence_score: f64,
}
