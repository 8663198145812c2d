//! # PropertyIQ
//!
//! A thin HTTP API over the ATTOM property data service. It fans city
//! searches out over mapped ZIP codes, normalizes heterogeneous upstream
//! records into one flat schema, and computes rough investment metrics.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Property schema, field extraction, normalization and the provider trait
//! - **Application Layer** ([`application`]) - Search fan-out, detail lookup, verification and market figures
//! - **Infrastructure Layer** ([`infrastructure`]) - ATTOM HTTP client
//! - **API Layer** ([`api`]) - REST handlers, DTOs and middleware
//!
//! ## Quick Start
//!
//! ```bash
//! export ATTOM_API_KEY="..."
//! cargo run
//! curl "http://localhost:8000/api/v1/properties/search/attom?city=Austin&state=TX&limit=5"
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AnalysisService, PropertyService};
    pub use crate::domain::metrics::Assumptions;
    pub use crate::domain::{CityZipTable, NormalizedProperty, PropertyProvider, UpstreamError};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
