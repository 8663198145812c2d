//! HTTP server initialization and runtime setup.
//!
//! Builds the upstream client and services, then runs the Axum server until
//! a shutdown signal arrives.

use crate::application::services::{AnalysisService, PropertyService};
use crate::config::Config;
use crate::domain::metrics::Assumptions;
use crate::domain::provider::PropertyProvider;
use crate::infrastructure::attom::AttomClient;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Builds shared state from configuration.
///
/// # Errors
///
/// Returns an error if the upstream HTTP client cannot be constructed.
pub fn build_state(config: &Config) -> Result<AppState> {
    let client = AttomClient::new(
        &config.attom_base_url,
        config.attom_api_key.clone(),
        config.upstream_timeout(),
    )
    .context("Failed to build ATTOM client")?;

    if client.is_configured() {
        tracing::info!("Upstream client ready ({})", client.base_url());
    } else {
        tracing::warn!("Upstream client has no API key; search and detail will answer 503");
    }

    let provider: Arc<dyn PropertyProvider> = Arc::new(client);
    let city_zips = Arc::new(config.city_zips.clone());

    let property_service = Arc::new(PropertyService::new(
        provider,
        city_zips.clone(),
        config.upstream_concurrency,
    ));
    let analysis_service = Arc::new(AnalysisService::new(Assumptions::default(), city_zips));

    Ok(AppState::new(property_service, analysis_service))
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - The upstream client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config)?;

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address: {}", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
