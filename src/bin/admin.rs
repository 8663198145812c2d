//! CLI administration tool for PropertyIQ.
//!
//! Inspects configuration, the city → ZIP table, and the normalizer without
//! starting the HTTP server.
//!
//! # Usage
//!
//! ```bash
//! # List supported cities and their ZIP codes
//! cargo run --bin propertyiq-admin -- zips
//!
//! # Normalize a saved upstream response (or `-` for stdin)
//! cargo run --bin propertyiq-admin -- normalize response.json
//!
//! # Fetch and normalize one ZIP code live
//! cargo run --bin propertyiq-admin -- fetch --zip 78701 --limit 5
//!
//! # Show effective configuration
//! cargo run --bin propertyiq-admin -- config
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see [`propertyiq::config`]. `fetch` requires
//! `ATTOM_API_KEY`.

use propertyiq::config::{self, Config, mask_secret};
use propertyiq::domain::extract::ExtractedFields;
use propertyiq::domain::normalize::normalize;
use propertyiq::domain::{NormalizedProperty, PropertyProvider};
use propertyiq::infrastructure::attom::{AttomClient, MAX_PAGE_SIZE};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use serde_json::Value;
use std::io::Read;

/// CLI tool for inspecting PropertyIQ.
#[derive(Parser)]
#[command(name = "propertyiq-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported cities and their ZIP codes
    Zips,

    /// Normalize upstream records from a file
    Normalize {
        /// JSON file holding a record, an array of records, or a `{"property": [...]}` envelope; `-` reads stdin
        file: String,

        /// Show which source path fed each numeric field
        #[arg(short, long)]
        sources: bool,
    },

    /// Fetch one ZIP code from the upstream and print normalized results
    Fetch {
        /// Five-digit ZIP code
        #[arg(short, long)]
        zip: String,

        /// Page size requested from the upstream
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Show effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Failed to load configuration")?;

    match cli.command {
        Commands::Zips => show_zips(&config),
        Commands::Normalize { file, sources } => normalize_file(&file, sources)?,
        Commands::Fetch { zip, limit } => fetch_zip(&config, &zip, limit).await?,
        Commands::Config => show_config(&config),
    }

    Ok(())
}

/// Prints the city → ZIP table.
///
/// ```text
/// Supported cities
///
///   City           State  ZIPs
///   austin         TX     78701, 78702, ...
/// ```
fn show_zips(config: &Config) {
    println!("{}", "Supported cities".bright_blue().bold());
    println!();
    println!(
        "  {:<14} {:<6} {}",
        "City".bright_white().bold(),
        "State".bright_white().bold(),
        "ZIPs".bright_white().bold()
    );
    println!("  {}", "-".repeat(60).bright_black());

    for (city, entry) in config.city_zips.iter() {
        println!(
            "  {:<14} {:<6} {}",
            city.cyan(),
            entry.state,
            entry.zips.join(", ").bright_black()
        );
    }

    println!();
    println!(
        "  Total: {}",
        config.city_zips.len().to_string().bright_white().bold()
    );
}

/// Reads records from `path` and prints the normalized JSON.
fn normalize_file(path: &str, show_sources: bool) -> Result<()> {
    let raw = if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Cannot read '{}'", path))?
    };

    let json: Value = serde_json::from_str(&raw).context("Input is not valid JSON")?;
    let records = split_records(json);

    if records.is_empty() {
        println!("{}", "No records found in input".yellow());
        return Ok(());
    }

    if show_sources {
        records.iter().for_each(print_sources);
    }

    let normalized: Vec<NormalizedProperty> = records.iter().map(normalize).collect();
    println!("{}", serde_json::to_string_pretty(&normalized)?);

    Ok(())
}

/// Accepts a bare record, an array, or the upstream envelope.
fn split_records(json: Value) -> Vec<Value> {
    match json {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("property") {
            Some(Value::Array(items)) => items,
            Some(other) => {
                map.insert("property".to_string(), other);
                vec![Value::Object(map)]
            }
            None => vec![Value::Object(map)],
        },
        _ => Vec::new(),
    }
}

fn print_sources(record: &Value) {
    let id = record
        .pointer("/identifier/attomId")
        .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
        .unwrap_or_else(|| "?".to_string());

    eprintln!("{} {}", "Record".bright_white().bold(), id.cyan());
    for (field, source) in ExtractedFields::from_record(record).sources() {
        let shown = match source {
            Some(path) => path.green(),
            None => "default".yellow(),
        };
        eprintln!("  {:<12} {}", field, shown);
    }
}

/// Fetches one ZIP page and prints a summary table.
async fn fetch_zip(config: &Config, zip: &str, limit: usize) -> Result<()> {
    if zip.len() != 5 || !zip.chars().all(|c| c.is_ascii_digit()) {
        anyhow::bail!("ZIP code must be five digits, got '{}'", zip);
    }

    let client = AttomClient::new(
        &config.attom_base_url,
        config.attom_api_key.clone(),
        config.upstream_timeout(),
    )?;

    if !client.is_configured() {
        anyhow::bail!("ATTOM_API_KEY must be set to fetch from the upstream");
    }

    let page_size = limit.clamp(1, MAX_PAGE_SIZE);
    println!(
        "{} {} (page size {})",
        "Fetching".bright_blue().bold(),
        zip.cyan(),
        page_size
    );
    println!();

    let records = client
        .fetch_by_zip(zip, page_size)
        .await
        .map_err(|e| anyhow::anyhow!("Upstream request failed: {}", e))?;

    let properties: Vec<NormalizedProperty> = records.iter().map(normalize).collect();

    if properties.is_empty() {
        println!("{}", "  No properties returned".yellow());
        return Ok(());
    }

    println!(
        "  {:<12} {:<36} {:>12} {:>5} {:>6}",
        "ID".bright_white().bold(),
        "Address".bright_white().bold(),
        "Price".bright_white().bold(),
        "Beds".bright_white().bold(),
        "Sqft".bright_white().bold()
    );
    println!("  {}", "-".repeat(75).bright_black());

    for p in &properties {
        println!(
            "  {:<12} {:<36} {:>12.0} {:>5} {:>6}",
            p.id.bright_black(),
            truncate(&p.address, 36).cyan(),
            p.price,
            p.bedrooms,
            p.square_feet
        );
    }

    println!();
    println!(
        "  Total: {}",
        properties.len().to_string().bright_white().bold()
    );

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max - 1).collect();
        out.push('~');
        out
    }
}

fn show_config(config: &Config) {
    println!("{}", "Configuration".bright_blue().bold());
    println!();
    println!("  Listen address:       {}", config.listen_addr.cyan());
    println!("  ATTOM base URL:       {}", config.attom_base_url.cyan());
    match &config.attom_api_key {
        Some(key) => println!("  ATTOM API key:        {}", mask_secret(key).green()),
        None => println!("  ATTOM API key:        {}", "not set".red()),
    }
    println!("  Log level:            {}", config.log_level);
    println!("  Log format:           {}", config.log_format);
    println!("  Upstream concurrency: {}", config.upstream_concurrency);
    println!("  Upstream timeout:     {}s", config.upstream_timeout_secs);
    println!("  Cities mapped:        {}", config.city_zips.len());
    println!();
}
