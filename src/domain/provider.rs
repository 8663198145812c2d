//! Contract for the upstream property data source.

use async_trait::async_trait;
use serde_json::Value;

/// Errors produced by a [`PropertyProvider`].
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("Upstream API key is not configured")]
    NotConfigured,

    #[error("Upstream request failed: {0}")]
    Transport(String),

    #[error("Upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode upstream response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}

/// Source of raw property records.
///
/// Records are returned as untyped JSON; shaping them is the job of
/// [`crate::domain::normalize`].
///
/// # Implementations
///
/// - [`crate::infrastructure::attom::AttomClient`] - ATTOM property API
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PropertyProvider: Send + Sync {
    /// Fetches up to `page_size` raw records located in a ZIP code.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] when the provider cannot be reached, answers
    /// with a non-success status, or sends an undecodable body.
    async fn fetch_by_zip(&self, zip: &str, page_size: usize) -> Result<Vec<Value>, UpstreamError>;

    /// Fetches a single raw record by provider ID.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))` if found
    /// - `Ok(None)` if the provider knows no such property
    async fn fetch_by_id(&self, id: &str) -> Result<Option<Value>, UpstreamError>;

    /// Whether credentials for the provider are present.
    fn is_configured(&self) -> bool;
}
