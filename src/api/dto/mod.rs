//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Response bodies for properties reuse
//! [`crate::domain::property::NormalizedProperty`] directly.

pub mod analytics;
pub mod health;
pub mod property;
pub mod verify;
