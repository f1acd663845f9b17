//! Main client for the Open-Meteo API.

use crate::api::*;
use crate::config::{ClientConfig, Endpoints, Host};
use crate::error::OpenMeteoResult;
use crate::transport::HttpTransport;
use serde_json::Value;
use std::sync::Arc;
use url::Url;

/// Client for the Open-Meteo API.
///
/// Every method takes an already-validated parameter object and returns the
/// decoded JSON body untouched.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    config: Arc<ClientConfig>,
    http: HttpTransport,
}

impl OpenMeteoClient {
    /// Create a new client builder.
    pub fn builder() -> OpenMeteoClientBuilder {
        OpenMeteoClientBuilder::new()
    }

    /// Create a client from configuration.
    pub fn from_config(config: ClientConfig) -> OpenMeteoResult<Self> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Best-match weather forecast.
    pub async fn forecast(&self, params: &ForecastParams) -> OpenMeteoResult<Value> {
        self.forecast_model(ForecastModel::BestMatch, params).await
    }

    /// Forecast from one model-specific endpoint.
    pub async fn forecast_model(
        &self,
        model: ForecastModel,
        params: &ForecastParams,
    ) -> OpenMeteoResult<Value> {
        self.http.get_json(model.host(), model.path(), params).await
    }

    /// DWD ICON forecast (Germany).
    pub async fn dwd_icon(&self, params: &ForecastParams) -> OpenMeteoResult<Value> {
        self.forecast_model(ForecastModel::DwdIcon, params).await
    }

    /// NOAA GFS forecast.
    pub async fn gfs(&self, params: &ForecastParams) -> OpenMeteoResult<Value> {
        self.forecast_model(ForecastModel::Gfs, params).await
    }

    /// Meteo-France AROME/ARPEGE forecast.
    pub async fn meteofrance(&self, params: &ForecastParams) -> OpenMeteoResult<Value> {
        self.forecast_model(ForecastModel::MeteoFrance, params).await
    }

    /// ECMWF IFS forecast.
    pub async fn ecmwf(&self, params: &ForecastParams) -> OpenMeteoResult<Value> {
        self.forecast_model(ForecastModel::Ecmwf, params).await
    }

    /// JMA forecast (Japan).
    pub async fn jma(&self, params: &ForecastParams) -> OpenMeteoResult<Value> {
        self.forecast_model(ForecastModel::Jma, params).await
    }

    /// MET Norway forecast (Nordics).
    pub async fn metno(&self, params: &ForecastParams) -> OpenMeteoResult<Value> {
        self.forecast_model(ForecastModel::Metno, params).await
    }

    /// Environment Canada GEM forecast.
    pub async fn gem(&self, params: &ForecastParams) -> OpenMeteoResult<Value> {
        self.forecast_model(ForecastModel::Gem, params).await
    }

    /// Long-range seasonal forecast.
    pub async fn seasonal(&self, params: &ForecastParams) -> OpenMeteoResult<Value> {
        self.forecast_model(ForecastModel::Seasonal, params).await
    }

    /// CMIP6 climate projection.
    pub async fn climate(&self, params: &ForecastParams) -> OpenMeteoResult<Value> {
        self.forecast_model(ForecastModel::Climate, params).await
    }

    /// Ensemble forecast.
    pub async fn ensemble(&self, params: &ForecastParams) -> OpenMeteoResult<Value> {
        self.forecast_model(ForecastModel::Ensemble, params).await
    }

    /// Historical weather.
    pub async fn archive(&self, params: &ArchiveParams) -> OpenMeteoResult<Value> {
        self.http.get_json(Host::Archive, "/v1/archive", params).await
    }

    pub async fn air_quality(&self, params: &AirQualityParams) -> OpenMeteoResult<Value> {
        self.http
            .get_json(Host::AirQuality, "/v1/air-quality", params)
            .await
    }

    pub async fn marine(&self, params: &MarineParams) -> OpenMeteoResult<Value> {
        self.http.get_json(Host::Marine, "/v1/marine", params).await
    }

    pub async fn flood(&self, params: &FloodParams) -> OpenMeteoResult<Value> {
        self.http.get_json(Host::Flood, "/v1/flood", params).await
    }

    pub async fn elevation(&self, params: &ElevationParams) -> OpenMeteoResult<Value> {
        self.http
            .get_json(Host::Forecast, "/v1/elevation", params)
            .await
    }

    /// Search locations by name.
    pub async fn geocoding(&self, params: &GeocodingParams) -> OpenMeteoResult<Value> {
        self.http.get_json(Host::Geocoding, "/v1/search", params).await
    }
}

/// Builder for creating an OpenMeteoClient.
#[derive(Debug, Default)]
pub struct OpenMeteoClientBuilder {
    endpoints: Option<Endpoints>,
    base_url: Option<String>,
}

impl OpenMeteoClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of every API host individually.
    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = Some(endpoints);
        self
    }

    /// Route every API host through a single base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> OpenMeteoResult<OpenMeteoClient> {
        let endpoints = match (self.base_url, self.endpoints) {
            (Some(base_url), _) => Endpoints::all(Url::parse(&base_url)?),
            (None, Some(endpoints)) => endpoints,
            (None, None) => Endpoints::default(),
        };

        OpenMeteoClient::from_config(ClientConfig::new(endpoints))
    }
}
