//! Application layer services implementing business logic.
//!
//! Services coordinate the domain logic with the upstream provider and give
//! HTTP handlers a small, typed API.
//!
//! # Available Services
//!
//! - [`services::property_service::PropertyService`] - City search fan-out and property lookup
//! - [`services::analysis_service::AnalysisService`] - Listing verification and market figures

pub mod services;
