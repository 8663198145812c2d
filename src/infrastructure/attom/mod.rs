//! ATTOM Data property API integration.
//!
//! Implements [`crate::domain::provider::PropertyProvider`] on top of
//! `reqwest`. See [`AttomClient`].

mod client;

pub use client::{AttomClient, MAX_PAGE_SIZE};
