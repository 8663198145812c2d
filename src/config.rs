//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Upstream
//!
//! ```bash
//! export ATTOM_API_KEY="..."
//! export ATTOM_BASE_URL="https://api.gateway.attomdata.com/propertyapi/v1.0.0"
//! ```
//!
//! A missing `ATTOM_API_KEY` does not stop the service. `/health` reports
//! `attom_configured: false` and routes that need the upstream answer
//! `503 Service Unavailable`.
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:{PORT}`)
//! - `PORT` - Port used when `LISTEN` is unset (default: `8000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `UPSTREAM_CONCURRENCY` - Parallel ZIP lookups per search (default: 4, max: 32)
//! - `UPSTREAM_TIMEOUT_SECS` - Per-call upstream timeout (default: 30)
//! - `CITY_ZIPS_FILE` - JSON file replacing the built-in city → ZIP table

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

use crate::domain::city_zips::CityZipTable;

pub const DEFAULT_ATTOM_BASE_URL: &str = "https://api.gateway.attomdata.com/propertyapi/v1.0.0";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub attom_api_key: Option<String>,
    pub attom_base_url: String,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Maximum number of upstream ZIP lookups in flight for one search.
    pub upstream_concurrency: usize,
    /// Timeout applied to each upstream HTTP call, in seconds.
    pub upstream_timeout_secs: u64,
    /// City → ZIP table, built-in unless `CITY_ZIPS_FILE` is set.
    pub city_zips: CityZipTable,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `CITY_ZIPS_FILE` is set but cannot be read or parsed.
    pub fn from_env() -> Result<Self> {
        let attom_api_key = env::var("ATTOM_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        let attom_base_url =
            env::var("ATTOM_BASE_URL").unwrap_or_else(|_| DEFAULT_ATTOM_BASE_URL.to_string());

        let listen_addr = Self::load_listen_addr();
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let upstream_concurrency = env::var("UPSTREAM_CONCURRENCY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(4);

        let upstream_timeout_secs = env::var("UPSTREAM_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        let city_zips = Self::load_city_zips().context("Failed to load city ZIP table")?;

        Ok(Self {
            attom_api_key,
            attom_base_url,
            listen_addr,
            log_level,
            log_format,
            upstream_concurrency,
            upstream_timeout_secs,
            city_zips,
        })
    }

    /// Resolves the bind address.
    ///
    /// Priority:
    /// 1. `LISTEN` environment variable
    /// 2. `0.0.0.0:{PORT}` with `PORT` defaulting to 8000
    fn load_listen_addr() -> String {
        if let Ok(listen) = env::var("LISTEN") {
            return listen;
        }

        let port = env::var("PORT").unwrap_or_else(|_| "8000".to_string());
        format!("0.0.0.0:{}", port)
    }

    /// Reads the city table from `CITY_ZIPS_FILE`, or falls back to the built-in one.
    fn load_city_zips() -> Result<CityZipTable> {
        let Ok(path) = env::var("CITY_ZIPS_FILE") else {
            return Ok(CityZipTable::default());
        };

        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("Cannot read CITY_ZIPS_FILE '{}'", path))?;

        CityZipTable::from_json(&json).with_context(|| format!("Invalid CITY_ZIPS_FILE '{}'", path))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `attom_base_url` is not an http(s) URL
    /// - `upstream_concurrency` is outside 1..=32
    /// - `upstream_timeout_secs` is 0
    pub fn validate(&self) -> Result<()> {
        // Validate log format
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        // Validate listen address format
        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        let base = url::Url::parse(&self.attom_base_url)
            .with_context(|| format!("ATTOM_BASE_URL is not a valid URL: '{}'", self.attom_base_url))?;
        if base.scheme() != "http" && base.scheme() != "https" {
            anyhow::bail!(
                "ATTOM_BASE_URL must use http or https, got '{}'",
                self.attom_base_url
            );
        }

        if self.upstream_concurrency == 0 || self.upstream_concurrency > 32 {
            anyhow::bail!(
                "UPSTREAM_CONCURRENCY must be between 1 and 32, got {}",
                self.upstream_concurrency
            );
        }

        if self.upstream_timeout_secs == 0 {
            anyhow::bail!("UPSTREAM_TIMEOUT_SECS must be greater than 0");
        }

        Ok(())
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    /// Returns whether an upstream API key is present.
    pub fn is_attom_configured(&self) -> bool {
        self.attom_api_key.is_some()
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  ATTOM base URL: {}", self.attom_base_url);

        match &self.attom_api_key {
            Some(key) => tracing::info!("  ATTOM API key: {}", mask_secret(key)),
            None => tracing::warn!("  ATTOM API key: not set, upstream routes will answer 503"),
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Upstream concurrency: {}", self.upstream_concurrency);
        tracing::info!("  Upstream timeout: {}s", self.upstream_timeout_secs);
        tracing::info!("  Cities mapped: {}", self.city_zips.len());
    }
}

/// Masks a secret for logging, keeping the last four characters.
///
/// - `abcdef123456` → `********3456`
/// - `abc` → `***`
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }

    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if the city table cannot be loaded or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
