//! Property search and lookup against the upstream provider.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::domain::city_zips::CityZipTable;
use crate::domain::normalize::normalize;
use crate::domain::property::NormalizedProperty;
use crate::domain::provider::{PropertyProvider, UpstreamError};
use crate::error::AppError;

/// Upper bound on results for a single search.
pub const MAX_SEARCH_LIMIT: usize = 100;

/// Service that turns city searches into ZIP fan-outs and normalizes results.
///
/// Holds no per-request state; a single instance is shared by all handlers.
pub struct PropertyService {
    provider: Arc<dyn PropertyProvider>,
    city_zips: Arc<CityZipTable>,
    concurrency: usize,
}

impl PropertyService {
    /// Creates a new property service.
    ///
    /// `concurrency` bounds the number of upstream calls in flight for one
    /// search; values below 1 are raised to 1.
    pub fn new(
        provider: Arc<dyn PropertyProvider>,
        city_zips: Arc<CityZipTable>,
        concurrency: usize,
    ) -> Self {
        Self {
            provider,
            city_zips,
            concurrency: concurrency.max(1),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_configured()
    }

    pub fn city_zips(&self) -> &CityZipTable {
        &self.city_zips
    }

    /// Searches a city by querying every mapped ZIP code.
    ///
    /// Unsupported cities yield an empty list without touching the upstream.
    /// Failed ZIP lookups are logged and contribute no records. Records without
    /// an address are dropped, then the union is truncated to `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] if the provider has no credentials.
    pub async fn search(
        &self,
        city: &str,
        state: &str,
        limit: usize,
    ) -> Result<Vec<NormalizedProperty>, AppError> {
        let limit = limit.clamp(1, MAX_SEARCH_LIMIT);

        let zips = self.city_zips.resolve(city, state);
        if zips.is_empty() {
            warn!(city, state, "No ZIP codes mapped for city");
            return Ok(Vec::new());
        }

        if !self.provider.is_configured() {
            return Err(UpstreamError::NotConfigured.into());
        }

        info!(city, state, limit, zip_count = zips.len(), "Searching properties");

        let raw = self.fetch_zips(zips, limit).await;
        let fetched = raw.len();

        let properties: Vec<NormalizedProperty> = raw
            .iter()
            .map(normalize)
            .filter(|p| !p.address.is_empty())
            .take(limit)
            .collect();

        info!(
            city,
            fetched,
            returned = properties.len(),
            "Search complete"
        );

        Ok(properties)
    }

    /// Fetches every ZIP with bounded concurrency and concatenates the results
    /// in ZIP order. Individual failures are logged and skipped.
    pub async fn fetch_zips(&self, zips: &[String], page_size: usize) -> Vec<Value> {
        let provider = &self.provider;

        let batches: Vec<Vec<Value>> = stream::iter(zips.iter().cloned())
            .map(|zip| async move {
                match provider.fetch_by_zip(&zip, page_size).await {
                    Ok(records) => {
                        info!(zip = %zip, count = records.len(), "ZIP lookup succeeded");
                        records
                    }
                    Err(e) => {
                        warn!(zip = %zip, error = %e, "ZIP lookup failed");
                        Vec::new()
                    }
                }
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        batches.into_iter().flatten().collect()
    }

    /// Looks up a single property by provider ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the provider returns nothing or the
    /// lookup fails. Returns [`AppError::Unavailable`] if the provider has no
    /// credentials.
    pub async fn get_property(&self, id: &str) -> Result<NormalizedProperty, AppError> {
        let not_found = || AppError::not_found("Property not found", json!({ "id": id }));

        match self.provider.fetch_by_id(id).await {
            Ok(Some(record)) => {
                let mut property = normalize(&record);
                if property.id.is_empty() {
                    property.id = id.to_string();
                }
                Ok(property)
            }
            Ok(None) => Err(not_found()),
            Err(UpstreamError::NotConfigured) => Err(UpstreamError::NotConfigured.into()),
            Err(e) => {
                warn!(id, error = %e, "Property lookup failed");
                Err(not_found())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::provider::MockPropertyProvider;

    fn record(id: u32, line1: &str, price: u32) -> Value {
        json!({
            "identifier": { "attomId": id },
            "address": { "line1": line1, "locality": "Austin", "countrySubd": "TX", "postal1": "78701" },
            "assessment": { "market": { "mktttlvalue": price } }
        })
    }

    fn records(count: u32, offset: u32) -> Vec<Value> {
        (0..count)
            .map(|i| record(offset + i, &format!("{} Congress Ave", offset + i), 300_000))
            .collect()
    }

    fn service(mock: MockPropertyProvider) -> PropertyService {
        PropertyService::new(Arc::new(mock), Arc::new(CityZipTable::default()), 4)
    }

    #[tokio::test]
    async fn test_search_calls_each_mapped_zip_once() {
        let mut mock = MockPropertyProvider::new();
        mock.expect_is_configured().return_const(true);
        mock.expect_fetch_by_zip()
            .times(10)
            .returning(|zip, _| {
                let offset: u32 = zip.parse().unwrap();
                Ok(records(2, offset * 10))
            });

        let results = service(mock).search("Austin", "TX", 100).await.unwrap();
        assert_eq!(results.len(), 20);
        // ZIP order is preserved in the union.
        assert_eq!(results[0].id, "787010");
        assert_eq!(results[19].id, "787241");
    }

    #[tokio::test]
    async fn test_search_truncates_to_limit() {
        let mut mock = MockPropertyProvider::new();
        mock.expect_is_configured().return_const(true);
        mock.expect_fetch_by_zip()
            .times(10)
            .returning(|_, _| Ok(records(15, 0)));

        let results = service(mock).search("austin", "tx", 5).await.unwrap();
        assert_eq!(results.len(), 5);
    }

    #[tokio::test]
    async fn test_search_passes_limit_as_page_size() {
        let mut mock = MockPropertyProvider::new();
        mock.expect_is_configured().return_const(true);
        mock.expect_fetch_by_zip()
            .withf(|_, page_size| *page_size == 7)
            .times(10)
            .returning(|_, _| Ok(vec![]));

        let results = service(mock).search("Dallas", "TX", 7).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_search_unsupported_city_makes_no_calls() {
        let mut mock = MockPropertyProvider::new();
        mock.expect_is_configured().never();
        mock.expect_fetch_by_zip().never();

        let results = service(mock).search("Springfield", "IL", 20).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_search_tolerates_partial_failures() {
        let mut mock = MockPropertyProvider::new();
        mock.expect_is_configured().return_const(true);
        mock.expect_fetch_by_zip().times(10).returning(|zip, _| {
            if zip == "77001" {
                Ok(records(3, 0))
            } else {
                Err(UpstreamError::Status {
                    status: 500,
                    body: "boom".to_string(),
                })
            }
        });

        let results = service(mock).search("Houston", "TX", 20).await.unwrap();
        assert_eq!(results.len(), 3);
    }

    #[tokio::test]
    async fn test_search_all_failures_is_empty_success() {
        let mut mock = MockPropertyProvider::new();
        mock.expect_is_configured().return_const(true);
        mock.expect_fetch_by_zip()
            .times(10)
            .returning(|_, _| Err(UpstreamError::Transport("connection refused".into())));

        let results = service(mock).search("Austin", "TX", 20).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_search_drops_records_without_address() {
        let mut mock = MockPropertyProvider::new();
        mock.expect_is_configured().return_const(true);
        mock.expect_fetch_by_zip().times(10).returning(|zip, _| {
            if zip == "78701" {
                Ok(vec![json!({ "identifier": { "attomId": 1 } }), record(2, "2 Main St", 1)])
            } else {
                Ok(vec![])
            }
        });

        let results = service(mock).search("Austin", "TX", 20).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "2");
    }

    #[tokio::test]
    async fn test_search_unconfigured_provider_is_unavailable() {
        let mut mock = MockPropertyProvider::new();
        mock.expect_is_configured().return_const(false);
        mock.expect_fetch_by_zip().never();

        let result = service(mock).search("Austin", "TX", 20).await;
        assert!(matches!(result, Err(AppError::Unavailable { .. })));
    }

    #[tokio::test]
    async fn test_get_property_found() {
        let mut mock = MockPropertyProvider::new();
        mock.expect_fetch_by_id()
            .withf(|id| id == "42")
            .times(1)
            .returning(|_| Ok(Some(record(42, "1 Main St", 450_000))));

        let property = service(mock).get_property("42").await.unwrap();
        assert_eq!(property.id, "42");
        assert_eq!(property.price, 450_000.0);
    }

    #[tokio::test]
    async fn test_get_property_echoes_requested_id_when_record_has_none() {
        let mut mock = MockPropertyProvider::new();
        mock.expect_fetch_by_id()
            .returning(|_| Ok(Some(json!({ "address": { "line1": "1 Main St" } }))));

        let property = service(mock).get_property("99").await.unwrap();
        assert_eq!(property.id, "99");
    }

    #[tokio::test]
    async fn test_get_property_not_found() {
        let mut mock = MockPropertyProvider::new();
        mock.expect_fetch_by_id().returning(|_| Ok(None));

        let result = service(mock).get_property("missing").await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_get_property_upstream_failure_is_not_found() {
        let mut mock = MockPropertyProvider::new();
        mock.expect_fetch_by_id()
            .returning(|_| Err(UpstreamError::Decode("bad json".into())));

        let result = service(mock).get_property("1").await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_get_property_unconfigured_is_unavailable() {
        let mut mock = MockPropertyProvider::new();
        mock.expect_fetch_by_id()
            .returning(|_| Err(UpstreamError::NotConfigured));

        let result = service(mock).get_property("1").await;
        assert!(matches!(result, Err(AppError::Unavailable { .. })));
    }

    /// Provider that holds each ZIP call open briefly and records peak overlap.
    #[derive(Default)]
    struct SlowProvider {
        in_flight: std::sync::atomic::AtomicUsize,
        peak: std::sync::atomic::AtomicUsize,
    }

    #[async_trait::async_trait]
    impl PropertyProvider for SlowProvider {
        async fn fetch_by_zip(&self, zip: &str, _: usize) -> Result<Vec<Value>, UpstreamError> {
            use std::sync::atomic::Ordering;

            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            Ok(vec![record(zip.parse().unwrap_or(0), "1 Slow St", 1)])
        }

        async fn fetch_by_id(&self, _: &str) -> Result<Option<Value>, UpstreamError> {
            Ok(None)
        }

        fn is_configured(&self) -> bool {
            true
        }
    }

    #[tokio::test]
    async fn test_fan_out_respects_concurrency_cap() {
        let provider = Arc::new(SlowProvider::default());
        let service = PropertyService::new(provider.clone(), Arc::new(CityZipTable::default()), 3);

        let results = service.search("Austin", "TX", 100).await.unwrap();

        assert_eq!(results.len(), 10);
        assert_eq!(
            provider.peak.load(std::sync::atomic::Ordering::SeqCst),
            3
        );
        // Order follows the ZIP table even though calls overlap.
        assert_eq!(results[0].id, "78701");
        assert_eq!(results[9].id, "78724");
    }
}
