//! Normalized property entity served to API consumers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Property categories understood by the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    #[default]
    SingleFamily,
    Condo,
    Townhouse,
    MultiFamily,
    Apartment,
    Manufactured,
}

impl PropertyType {
    /// Wire name, e.g. `single_family`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SingleFamily => "single_family",
            Self::Condo => "condo",
            Self::Townhouse => "townhouse",
            Self::MultiFamily => "multi_family",
            Self::Apartment => "apartment",
            Self::Manufactured => "manufactured",
        }
    }

    /// Human-readable label used in generated descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SingleFamily => "single family",
            Self::Condo => "condo",
            Self::Townhouse => "townhouse",
            Self::MultiFamily => "multi family",
            Self::Apartment => "apartment",
            Self::Manufactured => "manufactured",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A property record in the fixed output schema.
///
/// Built fresh from an upstream record by [`crate::domain::normalize::normalize`].
/// Every numeric field carries a default instead of being absent, so the JSON
/// shape is identical no matter how complete the upstream data was.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedProperty {
    pub id: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub price: f64,
    pub bedrooms: i64,
    pub bathrooms: f64,
    pub square_feet: i64,
    pub year_built: i64,
    pub lot_size: i64,
    pub property_type: PropertyType,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub estimated_value: f64,
    pub property_status: String,
    pub days_on_market: i64,
    pub hoa_fee: f64,
    pub property_tax_rate: f64,
    pub insurance_estimate: f64,
    pub description: String,
    pub features: Vec<String>,
    pub images: Vec<String>,
    pub neighborhood: String,
    pub school_rating: Option<f64>,
}
