//! HTTP middleware for request processing.
//!
//! Provides observability, cross-origin and panic recovery layers.

pub mod cors;
pub mod panic;
pub mod tracing;
