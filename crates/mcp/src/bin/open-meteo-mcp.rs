// Standalone MCP server binary

use anyhow::{Context, Result};
use clap::Parser;
use open_meteo_client::config::{
    DEFAULT_AIR_QUALITY_API_URL, DEFAULT_API_URL, DEFAULT_ARCHIVE_API_URL, DEFAULT_CLIMATE_API_URL,
    DEFAULT_ENSEMBLE_API_URL, DEFAULT_FLOOD_API_URL, DEFAULT_GEOCODING_API_URL,
    DEFAULT_MARINE_API_URL, DEFAULT_SEASONAL_API_URL,
};
use open_meteo_client::{ClientConfig, Endpoints, OpenMeteoClient};
use open_meteo_mcp::tools::weather_registry;
use open_meteo_mcp::{fault, Dispatcher, McpServer};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "open-meteo-mcp")]
#[command(about = "MCP server for the Open-Meteo weather API", long_about = None)]
#[command(version)]
struct Args {
    /// Forecast API base URL (also serves elevation)
    #[arg(long, env = "OPEN_METEO_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Historical weather API base URL
    #[arg(long, env = "OPEN_METEO_ARCHIVE_API_URL", default_value = DEFAULT_ARCHIVE_API_URL)]
    archive_api_url: String,

    /// Air quality API base URL
    #[arg(long, env = "OPEN_METEO_AIR_QUALITY_API_URL", default_value = DEFAULT_AIR_QUALITY_API_URL)]
    air_quality_api_url: String,

    /// Marine API base URL
    #[arg(long, env = "OPEN_METEO_MARINE_API_URL", default_value = DEFAULT_MARINE_API_URL)]
    marine_api_url: String,

    /// Flood API base URL
    #[arg(long, env = "OPEN_METEO_FLOOD_API_URL", default_value = DEFAULT_FLOOD_API_URL)]
    flood_api_url: String,

    /// Seasonal forecast API base URL
    #[arg(long, env = "OPEN_METEO_SEASONAL_API_URL", default_value = DEFAULT_SEASONAL_API_URL)]
    seasonal_api_url: String,

    /// Climate projection API base URL
    #[arg(long, env = "OPEN_METEO_CLIMATE_API_URL", default_value = DEFAULT_CLIMATE_API_URL)]
    climate_api_url: String,

    /// Ensemble API base URL
    #[arg(long, env = "OPEN_METEO_ENSEMBLE_API_URL", default_value = DEFAULT_ENSEMBLE_API_URL)]
    ensemble_api_url: String,

    /// Geocoding API base URL
    #[arg(long, env = "OPEN_METEO_GEOCODING_API_URL", default_value = DEFAULT_GEOCODING_API_URL)]
    geocoding_api_url: String,

    /// Emit logs as JSON lines
    #[arg(long, env = "OPEN_METEO_MCP_LOG_JSON")]
    log_json: bool,
}

impl Args {
    fn endpoints(&self) -> Result<Endpoints> {
        let endpoints = Endpoints::parse(
            &self.api_url,
            &self.archive_api_url,
            &self.air_quality_api_url,
            &self.marine_api_url,
            &self.flood_api_url,
            &self.seasonal_api_url,
            &self.climate_api_url,
            &self.ensemble_api_url,
            &self.geocoding_api_url,
        )?;
        Ok(endpoints)
    }
}

fn init_tracing(json: bool) {
    // stdout belongs to the protocol, logs go to stderr
    let builder = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false);

    if json {
        builder.json().init();
    } else {
        builder.with_ansi(false).init();
    }
}

async fn run(args: Args) -> Result<()> {
    let endpoints = args.endpoints().context("Invalid API URL")?;
    tracing::debug!(?endpoints, "Resolved endpoints");

    let client = OpenMeteoClient::from_config(ClientConfig::new(endpoints))
        .context("Failed to build HTTP client")?;
    let registry = weather_registry(Arc::new(client));
    tracing::info!("Registered {} tools", registry.len());

    let server = McpServer::new(Dispatcher::new(registry));
    server.start().await
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(args.log_json);
    fault::install_panic_hook();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Open-Meteo MCP server starting");

    if let Err(e) = run(args).await {
        tracing::error!(error = ?e, "Server failed");
        std::process::exit(1);
    }
}
