//! Forecast parameters, shared by the generic forecast endpoint, the
//! per-model endpoints, and the seasonal, climate and ensemble APIs.

use super::units::{PrecipitationUnit, TemperatureUnit, TimeFormat, WindSpeedUnit};
use crate::config::Host;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastParams {
    pub latitude: f64,
    pub longitude: f64,
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
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "crate::query::optional_list"
    )]
    pub current: Option<Vec<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "crate::query::optional_list"
    )]
    pub models: Option<Vec<String>>,
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub past_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecast_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl ForecastParams {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            ..Default::default()
        }
    }
}

/// Endpoints that accept [`ForecastParams`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastModel {
    /// Best-match blend of all models.
    BestMatch,
    DwdIcon,
    Gfs,
    MeteoFrance,
    Ecmwf,
    Jma,
    Metno,
    Gem,
    Seasonal,
    Climate,
    Ensemble,
}

impl ForecastModel {
    pub fn host(self) -> Host {
        match self {
            Self::Seasonal => Host::Seasonal,
            Self::Climate => Host::Climate,
            Self::Ensemble => Host::Ensemble,
            _ => Host::Forecast,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Self::BestMatch => "/v1/forecast",
            Self::DwdIcon => "/v1/dwd-icon",
            Self::Gfs => "/v1/gfs",
            Self::MeteoFrance => "/v1/meteofrance",
            Self::Ecmwf => "/v1/ecmwf",
            Self::Jma => "/v1/jma",
            Self::Metno => "/v1/metno",
            Self::Gem => "/v1/gem",
            Self::Seasonal => "/v1/seasonal",
            Self::Climate => "/v1/climate",
            Self::Ensemble => "/v1/ensemble",
        }
    }
}
