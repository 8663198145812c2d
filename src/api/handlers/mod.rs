//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod analytics;
pub mod health;
pub mod property;
pub mod search;
pub mod verify;

pub use analytics::analytics_handler;
pub use health::{health_handler, root_handler};
pub use property::property_detail_handler;
pub use search::search_handler;
pub use verify::verify_handler;
