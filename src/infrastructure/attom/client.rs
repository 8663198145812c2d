//! ATTOM property API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use crate::domain::provider::{PropertyProvider, UpstreamError};

/// ATTOM caps `pagesize` at 100.
pub const MAX_PAGE_SIZE: usize = 100;

const EXPANDED_PROFILE: &str = "property/expandedprofile";
const SNAPSHOT: &str = "property/snapshot";
const DETAIL: &str = "property/detail";
const EXPANDED_SECTIONS: &str = "market,assessment,detail";

/// Envelope shared by every ATTOM property endpoint.
#[derive(Debug, Deserialize)]
struct PropertyEnvelope {
    property: Option<Vec<Value>>,
}

/// HTTP client for the ATTOM property API.
///
/// Wraps a pooled [`reqwest::Client`]; cloning is cheap and shares the pool.
#[derive(Clone)]
pub struct AttomClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
}

impl AttomClient {
    /// Creates a client for `base_url`.
    ///
    /// An empty or missing `api_key` leaves the client unconfigured: it can
    /// be constructed, but every request fails with
    /// [`UpstreamError::NotConfigured`].
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Transport`] if the base URL is invalid or
    /// the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        let mut base = base_url.trim_end_matches('/').to_string();
        base.push('/');
        let base_url = Url::parse(&base)
            .map_err(|e| UpstreamError::Transport(format!("invalid base URL: {e}")))?;

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Issues a GET against a property endpoint and unwraps the envelope.
    async fn get_properties(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<Value>, UpstreamError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(UpstreamError::NotConfigured)?;

        let url = self
            .base_url
            .join(path)
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .header("apikey", api_key)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        debug!(path, status = status.as_u16(), "ATTOM response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: PropertyEnvelope = response.json().await?;
        Ok(envelope.property.unwrap_or_default())
    }
}

#[async_trait]
impl PropertyProvider for AttomClient {
    /// Queries the expanded profile endpoint, falling back to the basic
    /// snapshot when ATTOM rejects the expanded request.
    async fn fetch_by_zip(&self, zip: &str, page_size: usize) -> Result<Vec<Value>, UpstreamError> {
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE).to_string();
        info!(zip, page_size = %page_size, "Querying ATTOM by postal code");

        let expanded = self
            .get_properties(
                EXPANDED_PROFILE,
                &[
                    ("postalcode", zip.to_string()),
                    ("pagesize", page_size.clone()),
                    ("show", EXPANDED_SECTIONS.to_string()),
                ],
            )
            .await;

        let records = match expanded {
            Ok(records) => records,
            Err(UpstreamError::Status { status, body }) => {
                warn!(zip, status, body = %body, "Expanded profile rejected, trying snapshot");
                self.get_properties(
                    SNAPSHOT,
                    &[("postalcode", zip.to_string()), ("pagesize", page_size)],
                )
                .await?
            }
            Err(e) => return Err(e),
        };

        if let Some(first) = records.first() {
            log_record_shape(first);
        }
        info!(zip, count = records.len(), "ATTOM records received");

        Ok(records)
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<Value>, UpstreamError> {
        match self
            .get_properties(DETAIL, &[("attomid", id.to_string())])
            .await
        {
            Ok(records) => Ok(records.into_iter().next()),
            Err(UpstreamError::Status { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Logs the section layout of a record so schema drift shows up in debug logs.
fn log_record_shape(record: &Value) {
    let Some(sections) = record.as_object() else {
        return;
    };

    for (name, section) in sections {
        if let Some(fields) = section.as_object() {
            let keys: Vec<&str> = fields.keys().map(String::as_str).collect();
            debug!(section = %name, keys = ?keys, "ATTOM record section");
        }
    }
}
