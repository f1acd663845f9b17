//! Digital elevation model lookup parameters.

use serde::{Deserialize, Serialize};

/// Up to 100 coordinates per request; both lists have the same length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElevationParams {
    #[serde(serialize_with = "crate::query::list")]
    pub latitude: Vec<f64>,
    #[serde(serialize_with = "crate::query::list")]
    pub longitude: Vec<f64>,
}
