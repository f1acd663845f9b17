//! Historical weather (ERA5 reanalysis) parameters.

use super::units::{PrecipitationUnit, TemperatureUnit, TimeFormat, WindSpeedUnit};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveParams {
    pub latitude: f64,
    pub longitude: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "crate::query::optional_list"
    )]
    pub hourly: Option<Vec<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "crate::query::optional_list"
    )]
    pub daily: Option<Vec<String>>,
    #[serde(default)]
    pub temperature_unit: TemperatureUnit,
    #[serde(default)]
    pub wind_speed_unit: WindSpeedUnit,
    #[serde(default)]
    pub precipitation_unit: PrecipitationUnit,
    #[serde(default)]
    pub timeformat: TimeFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}
