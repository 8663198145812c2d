//! Domain layer: the property schema and the pure logic that fills it.
//!
//! Nothing in this layer performs I/O. The upstream data source is described
//! by the [`provider::PropertyProvider`] trait and implemented in
//! [`crate::infrastructure`].
//!
//! # Modules
//!
//! - [`property`] - The normalized output record
//! - [`extract`] - Prioritized field lookup with type coercion
//! - [`normalize`] - Raw record → [`property::NormalizedProperty`]
//! - [`city_zips`] - City → ZIP table used for search fan-out
//! - [`metrics`] - Investment metrics for the verify endpoint
//! - [`provider`] - Upstream data source contract

pub mod city_zips;
pub mod extract;
pub mod metrics;
pub mod normalize;
pub mod property;
pub mod provider;

pub use city_zips::{CityEntry, CityZipTable};
pub use property::{NormalizedProperty, PropertyType};
pub use provider::{PropertyProvider, UpstreamError};

#[cfg(test)]
pub use provider::MockPropertyProvider;
