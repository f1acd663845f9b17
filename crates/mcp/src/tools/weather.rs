// Weather tools backed by the Open-Meteo client

use crate::error::ToolError;
use crate::schema::{ParameterSchema, ValidatedParams};
use crate::tools::Tool;
use anyhow::Context;
use open_meteo_client::api::ForecastModel;
use open_meteo_client::OpenMeteoClient;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Remote operation behind a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Forecast(ForecastModel),
    Archive,
    AirQuality,
    Marine,
    Flood,
    Elevation,
    Geocoding,
}

impl Operation {
    /// Decode the validated arguments and call the matching client method.
    pub async fn invoke(
        self,
        client: &OpenMeteoClient,
        params: ValidatedParams,
    ) -> Result<serde_json::Value, ToolError> {
        let result = match self {
            Self::Forecast(model) => client.forecast_model(model, &decode(params)?).await,
            Self::Archive => client.archive(&decode(params)?).await,
            Self::AirQuality => client.air_quality(&decode(params)?).await,
            Self::Marine => client.marine(&decode(params)?).await,
            Self::Flood => client.flood(&decode(params)?).await,
            Self::Elevation => client.elevation(&decode(params)?).await,
            Self::Geocoding => client.geocoding(&decode(params)?).await,
        };
        Ok(result?)
    }
}

fn decode<T: DeserializeOwned>(params: ValidatedParams) -> Result<T, ToolError> {
    // Validation already ran; a failure here means schema and client types drifted.
    let decoded = params
        .decode()
        .with_context(|| format!("Validated arguments do not fit {}", std::any::type_name::<T>()))?;
    Ok(decoded)
}

/// One catalog entry bound to a client.
pub struct WeatherTool {
    name: &'static str,
    description: &'static str,
    parameters: ParameterSchema,
    operation: Operation,
    client: Arc<OpenMeteoClient>,
}

impl WeatherTool {
    pub fn new(
        name: &'static str,
        description: &'static str,
        parameters: ParameterSchema,
        operation: Operation,
        client: Arc<OpenMeteoClient>,
    ) -> Self {
        Self {
            name,
            description,
            parameters,
            operation,
            client,
        }
    }
}

#[async_trait::async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn parameters(&self) -> &ParameterSchema {
        &self.parameters
    }

    async fn invoke(&self, params: ValidatedParams) -> Result<serde_json::Value, ToolError> {
        tracing::debug!(tool = self.name, operation = ?self.operation, "Calling Open-Meteo");
        self.operation.invoke(&self.client, params).await
    }
}
