//! Shared state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AnalysisService, PropertyService};

#[derive(Clone)]
pub struct AppState {
    pub property_service: Arc<PropertyService>,
    pub analysis_service: Arc<AnalysisService>,
}

impl AppState {
    pub fn new(property_service: Arc<PropertyService>, analysis_service: Arc<AnalysisService>) -> Self {
        Self {
            property_service,
            analysis_service,
        }
    }
}
