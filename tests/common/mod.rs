#![allow(dead_code)]

use async_trait::async_trait;
use propertyiq::application::services::{AnalysisService, PropertyService};
use propertyiq::domain::metrics::Assumptions;
use propertyiq::domain::{CityZipTable, PropertyProvider, UpstreamError};
use propertyiq::state::AppState;
use serde_json::{Value, json};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory provider returning canned ATTOM-shaped records.
#[derive(Default)]
pub struct StubProvider {
    pub configured: bool,
    /// Records returned for every ZIP lookup.
    pub per_zip: usize,
    /// ZIP codes that answer with an upstream error.
    pub failing_zips: HashSet<String>,
    pub fail_all: bool,
    pub details: HashMap<String, Value>,
    pub zip_calls: AtomicUsize,
}

impl StubProvider {
    pub fn configured(per_zip: usize) -> Self {
        Self {
            configured: true,
            per_zip,
            ..Default::default()
        }
    }

    pub fn unconfigured() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            configured: true,
            fail_all: true,
            ..Default::default()
        }
    }

    pub fn with_detail(mut self, id: &str, record: Value) -> Self {
        self.details.insert(id.to_string(), record);
        self
    }

    pub fn calls(&self) -> usize {
        self.zip_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PropertyProvider for StubProvider {
    async fn fetch_by_zip(&self, zip: &str, page_size: usize) -> Result<Vec<Value>, UpstreamError> {
        self.zip_calls.fetch_add(1, Ordering::SeqCst);

        if !self.configured {
            return Err(UpstreamError::NotConfigured);
        }
        if self.fail_all || self.failing_zips.contains(zip) {
            return Err(UpstreamError::Status {
                status: 500,
                body: "boom".to_string(),
            });
        }

        Ok((0..self.per_zip.min(page_size))
            .map(|i| sample_record(&format!("{zip}{i:02}"), &format!("{i} Test St"), zip, 350_000))
            .collect())
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<Value>, UpstreamError> {
        if id == "panic" {
            panic!("stub provider asked to panic");
        }
        if !self.configured {
            return Err(UpstreamError::NotConfigured);
        }
        Ok(self.details.get(id).cloned())
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}

/// Builds an upstream record in the expanded profile shape.
pub fn sample_record(id: &str, line1: &str, zip: &str, price: u64) -> Value {
    json!({
        "identifier": { "attomId": id },
        "address": {
            "line1": line1,
            "locality": "Austin",
            "countrySubd": "TX",
            "postal1": zip
        },
        "location": { "latitude": "30.2672", "longitude": "-97.7431" },
        "summary": { "propertyType": "SINGLE FAMILY RESIDENCE", "proptype": "SFR", "yearbuilt": 1998 },
        "building": {
            "rooms": { "beds": 3, "bathstotal": 2.5 },
            "size": { "universalsize": 1850 }
        },
        "lot": { "lotsize1": 0.18 },
        "assessment": { "market": { "mktttlvalue": price } }
    })
}

pub fn create_test_state(provider: Arc<StubProvider>) -> AppState {
    let city_zips = Arc::new(CityZipTable::default());
    let property_service = Arc::new(PropertyService::new(provider, city_zips.clone(), 4));
    let analysis_service = Arc::new(AnalysisService::new(Assumptions::default(), city_zips));
    AppState::new(property_service, analysis_service)
}
