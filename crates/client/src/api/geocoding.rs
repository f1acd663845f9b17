//! Location search parameters.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodingParams {
    /// Place name or postal code.
    pub name: String,
    #[serde(default = "default_count")]
    pub count: u32,
    #[serde(default = "default_language")]
    pub language: String,
    /// ISO-3166-1 alpha-2 filter.
    #[serde(
        default,
        rename(serialize = "countryCode"),
        skip_serializing_if = "Option::is_none"
    )]
    pub country_code: Option<String>,
}

fn default_count() -> u32 {
    10
}

fn default_language() -> String {
    "en".to_string()
}

impl GeocodingParams {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            count: default_count(),
            language: default_language(),
            country_code: None,
        }
    }
}
