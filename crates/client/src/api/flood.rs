//! River discharge (GloFAS) parameters.

use super::units::{CellSelection, TimeFormat};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloodParams {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "crate::query::optional_list"
    )]
    pub daily: Option<Vec<String>>,
    #[serde(default)]
    pub timeformat: TimeFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub past_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecast_days: Option<u32>,
    /// Return all ensemble members instead of the control run.
    #[serde(default)]
    pub ensemble: bool,
    #[serde(default)]
    pub cell_selection: CellSelection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}
