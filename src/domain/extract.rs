//! Multi-strategy field extraction from raw ATTOM property records.
//!
//! Each logical field owns an ordered list of dotted JSON paths. Paths are
//! tried in order and the first value that coerces to a number and passes the
//! field's [`Acceptance`] test wins. Malformed values never fail the record;
//! they only fail the strategy that produced them.

use serde_json::Value;

/// Rule a coerced number must satisfy for a strategy to count as successful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceptance {
    /// Strictly greater than zero.
    Positive,
    /// Zero or greater.
    NonNegative,
    /// Anything but zero (coordinates).
    NonZero,
}

impl Acceptance {
    pub fn admits(self, value: f64) -> bool {
        match self {
            Self::Positive => value > 0.0,
            Self::NonNegative => value >= 0.0,
            Self::NonZero => value != 0.0,
        }
    }
}

/// A logical field and its prioritized lookup strategies.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub paths: &'static [&'static str],
    pub accept: Acceptance,
}

/// Result of resolving one field, with the path that produced it.
///
/// `source` is `None` when every strategy failed and `value` is the default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extraction<T> {
    pub value: T,
    pub source: Option<&'static str>,
}

impl<T> Extraction<T> {
    pub fn is_default(&self) -> bool {
        self.source.is_none()
    }
}

pub const PRICE: FieldSpec = FieldSpec {
    name: "price",
    paths: &[
        "assessment.market.mktttlvalue",
        "assessment.market.mktimprvalue",
        "assessment.assessed.assdttlvalue",
        "sale.amount.saleamt",
        "summary.propvalue",
    ],
    accept: Acceptance::Positive,
};

pub const BEDROOMS: FieldSpec = FieldSpec {
    name: "bedrooms",
    paths: &["building.rooms.beds"],
    accept: Acceptance::NonNegative,
};

pub const BATHROOMS: FieldSpec = FieldSpec {
    name: "bathrooms",
    paths: &["building.rooms.bathstotal", "building.rooms.bathsfull"],
    accept: Acceptance::NonNegative,
};

pub const SQUARE_FEET: FieldSpec = FieldSpec {
    name: "square_feet",
    paths: &[
        "building.size.universalsize",
        "building.size.livingsize",
        "building.size.bldgsize",
    ],
    accept: Acceptance::Positive,
};

pub const YEAR_BUILT: FieldSpec = FieldSpec {
    name: "year_built",
    paths: &["summary.yearbuilt", "building.construction.yearbuilt"],
    accept: Acceptance::Positive,
};

pub const LOT_SIZE: FieldSpec = FieldSpec {
    name: "lot_size",
    paths: &["lot.lotsize1", "lot.lotSize1"],
    accept: Acceptance::Positive,
};

pub const LATITUDE: FieldSpec = FieldSpec {
    name: "latitude",
    paths: &["location.latitude"],
    accept: Acceptance::NonZero,
};

pub const LONGITUDE: FieldSpec = FieldSpec {
    name: "longitude",
    paths: &["location.longitude"],
    accept: Acceptance::NonZero,
};

impl FieldSpec {
    /// Returns the first accepted number and the path it came from.
    pub fn resolve(&self, record: &Value) -> Option<(f64, &'static str)> {
        self.paths.iter().find_map(|path| {
            lookup(record, path)
                .and_then(coerce_f64)
                .filter(|v| self.accept.admits(*v))
                .map(|v| (v, *path))
        })
    }

    pub fn extract_f64(&self, record: &Value, default: f64) -> Extraction<f64> {
        match self.resolve(record) {
            Some((value, path)) => Extraction {
                value,
                source: Some(path),
            },
            None => Extraction {
                value: default,
                source: None,
            },
        }
    }

    /// Integer variant; fractional values are truncated toward zero.
    pub fn extract_i64(&self, record: &Value, default: i64) -> Extraction<i64> {
        match self.resolve(record) {
            Some((value, path)) => Extraction {
                value: value.trunc() as i64,
                source: Some(path),
            },
            None => Extraction {
                value: default,
                source: None,
            },
        }
    }

    pub fn extract_optional(&self, record: &Value) -> Extraction<Option<f64>> {
        match self.resolve(record) {
            Some((value, path)) => Extraction {
                value: Some(value),
                source: Some(path),
            },
            None => Extraction {
                value: None,
                source: None,
            },
        }
    }
}

/// Walks a dotted path through nested objects.
///
/// Returns `None` when any segment is missing, when an intermediate value is
/// not an object, or when the final value is `null` or an empty string.
pub fn lookup<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = record;
    for key in path.split('.') {
        current = current.as_object()?.get(key)?;
    }

    match current {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        other => Some(other),
    }
}

/// Reads a path as text. Numbers are rendered, other types are rejected.
pub fn lookup_string(record: &Value, path: &str) -> Option<String> {
    match lookup(record, path)? {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Coerces a JSON value to a finite number.
///
/// Accepts numbers and numeric strings. Everything else, including `NaN`
/// and infinities spelled as strings, is rejected.
pub fn coerce_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    parsed.is_finite().then_some(parsed)
}

/// Every numeric field of a record, resolved in one pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractedFields {
    pub price: Extraction<f64>,
    pub bedrooms: Extraction<i64>,
    pub bathrooms: Extraction<f64>,
    pub square_feet: Extraction<i64>,
    pub year_built: Extraction<i64>,
    pub lot_size: Extraction<i64>,
    pub latitude: Extraction<Option<f64>>,
    pub longitude: Extraction<Option<f64>>,
}

impl ExtractedFields {
    pub fn from_record(record: &Value) -> Self {
        Self {
            price: PRICE.extract_f64(record, 0.0),
            bedrooms: BEDROOMS.extract_i64(record, 0),
            bathrooms: BATHROOMS.extract_f64(record, 0.0),
            square_feet: SQUARE_FEET.extract_i64(record, 0),
            year_built: YEAR_BUILT.extract_i64(record, 0),
            lot_size: LOT_SIZE.extract_i64(record, 0),
            latitude: LATITUDE.extract_optional(record),
            longitude: LONGITUDE.extract_optional(record),
        }
    }

    /// `(field, winning path)` pairs for diagnostics.
    pub fn sources(&self) -> [(&'static str, Option<&'static str>); 8] {
        [
            (PRICE.name, self.price.source),
            (BEDROOMS.name, self.bedrooms.source),
            (BATHROOMS.name, self.bathrooms.source),
            (SQUARE_FEET.name, self.square_feet.source),
            (YEAR_BUILT.name, self.year_built.source),
            (LOT_SIZE.name, self.lot_size.source),
            (LATITUDE.name, self.latitude.source),
            (LONGITUDE.name, self.longitude.source),
        ]
    }
}
