//! HTTP transport layer for the Open-Meteo client.

use crate::config::{ClientConfig, Host};
use crate::error::{OpenMeteoError, OpenMeteoResult};
use reqwest::{header, Client};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// HTTP transport for making API requests.
///
/// Cloning is cheap; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> OpenMeteoResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    /// Build a URL for the given path on the given host.
    ///
    /// A path prefix on the configured base URL is kept.
    fn build_url(&self, host: Host, path: &str) -> OpenMeteoResult<Url> {
        let mut base = self.config.endpoints.get(host).clone();
        if !base.path().ends_with('/') {
            let prefixed = format!("{}/", base.path());
            base.set_path(&prefixed);
        }
        Ok(base.join(path.trim_start_matches('/'))?)
    }

    /// Execute a GET request with query parameters and return the JSON body as-is.
    pub async fn get_json<Q: Serialize + ?Sized>(
        &self,
        host: Host,
        path: &str,
        query: &Q,
    ) -> OpenMeteoResult<serde_json::Value> {
        let url = self.build_url(host, path)?;
        debug!(url = %url, "GET request with query");

        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(OpenMeteoError::from_response(status.as_u16(), &body));
        }

        debug!(status = status.as_u16(), bytes = body.len(), "GET response");
        Ok(serde_json::from_str(&body)?)
    }
}
