//! Parameter objects for each Open-Meteo endpoint.
//!
//! Each struct deserializes from already-validated tool arguments and
//! serializes into the endpoint's query string.

pub mod air_quality;
pub mod archive;
pub mod elevation;
pub mod flood;
pub mod forecast;
pub mod geocoding;
pub mod marine;
pub mod units;

pub use air_quality::AirQualityParams;
pub use archive::ArchiveParams;
pub use elevation::ElevationParams;
pub use flood::FloodParams;
pub use forecast::{ForecastModel, ForecastParams};
pub use geocoding::GeocodingParams;
pub use marine::MarineParams;
pub use units::*;
