//! Transport layer for the Open-Meteo client.

mod http;

pub use http::HttpTransport;
