//! Business logic services for the application layer.

pub mod analysis_service;
pub mod property_service;

pub use analysis_service::{AnalysisService, MarketSnapshot, Verification};
pub use property_service::{MAX_SEARCH_LIMIT, PropertyService};
