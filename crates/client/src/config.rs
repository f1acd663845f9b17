//! Configuration types for the Open-Meteo client.

use crate::error::{OpenMeteoError, OpenMeteoResult};
use url::Url;

pub const DEFAULT_API_URL: &str = "https://api.open-meteo.com";
pub const DEFAULT_ARCHIVE_API_URL: &str = "https://archive-api.open-meteo.com";
pub const DEFAULT_AIR_QUALITY_API_URL: &str = "https://air-quality-api.open-meteo.com";
pub const DEFAULT_MARINE_API_URL: &str = "https://marine-api.open-meteo.com";
pub const DEFAULT_FLOOD_API_URL: &str = "https://flood-api.open-meteo.com";
pub const DEFAULT_SEASONAL_API_URL: &str = "https://seasonal-api.open-meteo.com";
pub const DEFAULT_CLIMATE_API_URL: &str = "https://climate-api.open-meteo.com";
pub const DEFAULT_ENSEMBLE_API_URL: &str = "https://ensemble-api.open-meteo.com";
pub const DEFAULT_GEOCODING_API_URL: &str = "https://geocoding-api.open-meteo.com";

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("open-meteo-mcp/", env!("CARGO_PKG_VERSION"));

/// The Open-Meteo API is split across several hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Host {
    /// Forecast, per-model forecasts and elevation.
    Forecast,
    Archive,
    AirQuality,
    Marine,
    Flood,
    Seasonal,
    Climate,
    Ensemble,
    Geocoding,
}

/// Base URL for each API host.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub forecast: Url,
    pub archive: Url,
    pub air_quality: Url,
    pub marine: Url,
    pub flood: Url,
    pub seasonal: Url,
    pub climate: Url,
    pub ensemble: Url,
    pub geocoding: Url,
}

impl Endpoints {
    /// Point every host at the same base URL.
    pub fn all(base_url: Url) -> Self {
        Self {
            forecast: base_url.clone(),
            archive: base_url.clone(),
            air_quality: base_url.clone(),
            marine: base_url.clone(),
            flood: base_url.clone(),
            seasonal: base_url.clone(),
            climate: base_url.clone(),
            ensemble: base_url.clone(),
            geocoding: base_url,
        }
    }

    /// Parse every base URL from strings, reporting the first bad one.
    #[allow(clippy::too_many_arguments)]
    pub fn parse(
        forecast: &str,
        archive: &str,
        air_quality: &str,
        marine: &str,
        flood: &str,
        seasonal: &str,
        climate: &str,
        ensemble: &str,
        geocoding: &str,
    ) -> OpenMeteoResult<Self> {
        Ok(Self {
            forecast: parse_base_url(forecast)?,
            archive: parse_base_url(archive)?,
            air_quality: parse_base_url(air_quality)?,
            marine: parse_base_url(marine)?,
            flood: parse_base_url(flood)?,
            seasonal: parse_base_url(seasonal)?,
            climate: parse_base_url(climate)?,
            ensemble: parse_base_url(ensemble)?,
            geocoding: parse_base_url(geocoding)?,
        })
    }

    pub fn get(&self, host: Host) -> &Url {
        match host {
            Host::Forecast => &self.forecast,
            Host::Archive => &self.archive,
            Host::AirQuality => &self.air_quality,
            Host::Marine => &self.marine,
            Host::Flood => &self.flood,
            Host::Seasonal => &self.seasonal,
            Host::Climate => &self.climate,
            Host::Ensemble => &self.ensemble,
            Host::Geocoding => &self.geocoding,
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        // The defaults are compile-time constants and always parse.
        Self::parse(
            DEFAULT_API_URL,
            DEFAULT_ARCHIVE_API_URL,
            DEFAULT_AIR_QUALITY_API_URL,
            DEFAULT_MARINE_API_URL,
            DEFAULT_FLOOD_API_URL,
            DEFAULT_SEASONAL_API_URL,
            DEFAULT_CLIMATE_API_URL,
            DEFAULT_ENSEMBLE_API_URL,
            DEFAULT_GEOCODING_API_URL,
        )
        .expect("default Open-Meteo URLs are valid")
    }
}

fn parse_base_url(raw: &str) -> OpenMeteoResult<Url> {
    let url = Url::parse(raw)?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(OpenMeteoError::Config(format!(
            "Unsupported URL scheme '{}' in {}",
            url.scheme(),
            raw
        )));
    }
    Ok(url)
}

/// Configuration for the Open-Meteo client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of each API host.
    pub endpoints: Endpoints,
    /// User agent header value.
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a new configuration with the given endpoints.
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            endpoints,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(Endpoints::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let endpoints = Endpoints::default();

        assert_eq!(endpoints.get(Host::Forecast).as_str(), "https://api.open-meteo.com/");
        assert_eq!(
            endpoints.get(Host::Geocoding).as_str(),
            "https://geocoding-api.open-meteo.com/"
        );
        assert_eq!(
            endpoints.get(Host::AirQuality).host_str(),
            Some("air-quality-api.open-meteo.com")
        );
    }

    #[test]
    fn test_all_points_every_host_at_one_url() {
        let url = Url::parse("http://localhost:8080").unwrap();
        let endpoints = Endpoints::all(url.clone());

        for host in [
            Host::Forecast,
            Host::Archive,
            Host::AirQuality,
            Host::Marine,
            Host::Flood,
            Host::Seasonal,
            Host::Climate,
            Host::Ensemble,
            Host::Geocoding,
        ] {
            assert_eq!(endpoints.get(host), &url);
        }
    }

    #[test]
    fn test_parse_rejects_bad_urls() {
        let ok = DEFAULT_API_URL;
        let result = Endpoints::parse("not a url", ok, ok, ok, ok, ok, ok, ok, ok);
        assert!(matches!(result, Err(OpenMeteoError::InvalidUrl(_))));

        let result = Endpoints::parse(ok, "ftp://example.com", ok, ok, ok, ok, ok, ok, ok);
        assert!(matches!(result, Err(OpenMeteoError::Config(_))));
    }

    #[test]
    fn test_client_config_new() {
        let config = ClientConfig::default();
        assert!(config.user_agent.starts_with("open-meteo-mcp/"));
    }
}
