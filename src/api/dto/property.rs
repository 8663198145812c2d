//! DTOs for property search and detail endpoints.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};
use validator::Validate;

/// Results returned when `limit` is omitted.
pub const DEFAULT_SEARCH_LIMIT: u32 = 20;

/// Query parameters for `GET /api/v1/properties/search/attom`.
///
/// `city` and `state` are optional at the serde level so that a missing
/// parameter is reported through the validation error envelope.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct SearchParams {
    #[validate(
        required(message = "city is required"),
        length(min = 1, max = 100, message = "city must be 1-100 characters")
    )]
    pub city: Option<String>,

    #[validate(
        required(message = "state is required"),
        length(equal = 2, message = "state must be a two-letter code")
    )]
    pub state: Option<String>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: Option<u32>,
}

impl SearchParams {
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_SEARCH_LIMIT) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Query strings reach the extractor as string pairs; mirror that here.
    fn params(query: &str) -> SearchParams {
        let map: serde_json::Map<String, serde_json::Value> = query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect();
        serde_json::from_value(serde_json::Value::Object(map)).unwrap()
    }

    #[test]
    fn test_defaults() {
        let p = params("city=Austin&state=TX");
        assert!(p.validate().is_ok());
        assert_eq!(p.limit(), 20);
    }

    #[test]
    fn test_limit_parsed_from_string() {
        let p = params("city=Austin&state=TX&limit=5");
        assert_eq!(p.limit(), 5);
    }

    #[test]
    fn test_missing_city_is_invalid() {
        let p = params("state=TX");
        let errors = p.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("city"));
    }

    #[test]
    fn test_limit_bounds() {
        assert!(params("city=Austin&state=TX&limit=0").validate().is_err());
        assert!(params("city=Austin&state=TX&limit=100").validate().is_ok());
        assert!(params("city=Austin&state=TX&limit=101").validate().is_err());
    }

    #[test]
    fn test_state_must_be_two_letters() {
        assert!(params("city=Austin&state=Texas").validate().is_err());
    }
}
