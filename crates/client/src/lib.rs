//! # Open-Meteo client
//!
//! Async client for the [Open-Meteo](https://open-meteo.com) weather API.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use open_meteo_client::{api::ForecastParams, OpenMeteoClient, OpenMeteoResult};
//!
//! # async fn example() -> OpenMeteoResult<()> {
//! let client = OpenMeteoClient::builder().build()?;
//!
//! let params = ForecastParams {
//!     hourly: Some(vec!["temperature_2m".to_string()]),
//!     ..ForecastParams::new(52.52, 13.41)
//! };
//! let forecast = client.forecast(&params).await?;
//! println!("{}", forecast["hourly"]["temperature_2m"]);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
mod query;
pub mod transport;

pub use client::{OpenMeteoClient, OpenMeteoClientBuilder};
pub use config::{ClientConfig, Endpoints, Host};
pub use error::{OpenMeteoError, OpenMeteoResult};
