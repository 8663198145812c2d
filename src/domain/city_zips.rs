//! City to ZIP code lookup used to approximate a city-wide search.
//!
//! The table is injected into [`crate::application::services::PropertyService`]
//! at startup. Deployments can replace the built-in table with a JSON file:
//!
//! ```json
//! {
//!   "austin": { "state": "TX", "zips": ["78701", "78702"] }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// ZIP codes covered for one city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityEntry {
    pub state: String,
    pub zips: Vec<String>,
}

/// Errors raised while validating a city table.
#[derive(Debug, thiserror::Error)]
pub enum CityTableError {
    #[error("City table is empty")]
    Empty,

    #[error("City '{0}' has no ZIP codes")]
    NoZips(String),

    #[error("Invalid ZIP code '{zip}' for city '{city}'")]
    InvalidZip { city: String, zip: String },

    #[error("Failed to parse city table: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Case-insensitive city → ZIP mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CityZipTable {
    entries: BTreeMap<String, CityEntry>,
}

impl CityZipTable {
    /// Builds a table, normalizing keys and validating every ZIP code.
    ///
    /// # Errors
    ///
    /// Returns [`CityTableError`] when the table is empty, when a city has no
    /// ZIP codes, or when a ZIP code is not five ASCII digits.
    pub fn new(entries: BTreeMap<String, CityEntry>) -> Result<Self, CityTableError> {
        if entries.is_empty() {
            return Err(CityTableError::Empty);
        }

        let mut normalized = BTreeMap::new();
        for (city, entry) in entries {
            let city = city.trim().to_lowercase();
            if entry.zips.is_empty() {
                return Err(CityTableError::NoZips(city));
            }
            if let Some(zip) = entry.zips.iter().find(|z| !is_valid_zip(z)) {
                return Err(CityTableError::InvalidZip {
                    city,
                    zip: zip.clone(),
                });
            }
            normalized.insert(
                city,
                CityEntry {
                    state: entry.state.trim().to_uppercase(),
                    zips: entry.zips,
                },
            );
        }

        Ok(Self {
            entries: normalized,
        })
    }

    /// Parses a table from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns [`CityTableError::Parse`] for malformed JSON and the
    /// validation errors of [`CityZipTable::new`].
    pub fn from_json(json: &str) -> Result<Self, CityTableError> {
        let entries: BTreeMap<String, CityEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    /// ZIP codes for a city/state pair, or an empty slice when unsupported.
    pub fn resolve(&self, city: &str, state: &str) -> &[String] {
        self.entries
            .get(&city.trim().to_lowercase())
            .filter(|entry| entry.state.eq_ignore_ascii_case(state.trim()))
            .map(|entry| entry.zips.as_slice())
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CityEntry)> {
        self.entries.iter().map(|(city, entry)| (city.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CityZipTable {
    /// Four Texas metros with ten ZIP codes each.
    fn default() -> Self {
        const CITIES: [(&str, &str, [&str; 10]); 4] = [
            (
                "austin",
                "TX",
                [
                    "78701", "78702", "78703", "78704", "78705", "78712", "78721", "78722",
                    "78723", "78724",
                ],
            ),
            (
                "dallas",
                "TX",
                [
                    "75201", "75202", "75203", "75204", "75205", "75206", "75207", "75208",
                    "75209", "75210",
                ],
            ),
            (
                "houston",
                "TX",
                [
                    "77001", "77002", "77003", "77004", "77005", "77006", "77007", "77008",
                    "77009", "77010",
                ],
            ),
            (
                "san antonio",
                "TX",
                [
                    "78201", "78202", "78203", "78204", "78205", "78206", "78207", "78208",
                    "78209", "78210",
                ],
            ),
        ];

        let entries = CITIES
            .iter()
            .map(|(city, state, zips)| {
                (
                    city.to_string(),
                    CityEntry {
                        state: state.to_string(),
                        zips: zips.iter().map(|z| z.to_string()).collect(),
                    },
                )
            })
            .collect();

        Self { entries }
    }
}

fn is_valid_zip(zip: &str) -> bool {
    zip.len() == 5 && zip.bytes().all(|b| b.is_ascii_digit())
}
