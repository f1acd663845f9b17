// Error taxonomy for tool calls

use crate::schema::ValidationError;
use open_meteo_client::OpenMeteoError;

/// Everything that can go wrong while handling one `tools/call`.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownOperation(String),

    #[error("Invalid arguments for {tool}: {source}")]
    Validation {
        tool: String,
        #[source]
        source: ValidationError,
    },

    /// Non-2xx response or network failure. May be transient.
    #[error("{0}")]
    RemoteApi(OpenMeteoError),

    /// A defect or a malformed provider response.
    #[error("Unexpected error: {0:#}")]
    Unexpected(#[from] anyhow::Error),
}

impl ToolError {
    pub fn validation(tool: impl Into<String>, source: ValidationError) -> Self {
        Self::Validation {
            tool: tool.into(),
            source,
        }
    }

    /// Text shown to the caller, without the `Error: ` prefix.
    ///
    /// Unexpected errors only get a generic message; the detail is logged.
    pub fn caller_message(&self) -> String {
        match self {
            Self::Unexpected(_) => "An unexpected error occurred while handling the request".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<OpenMeteoError> for ToolError {
    fn from(err: OpenMeteoError) -> Self {
        match err {
            OpenMeteoError::Http(_) | OpenMeteoError::Api { .. } => Self::RemoteApi(err),
            other => Self::Unexpected(anyhow::Error::new(other).context("Open-Meteo client failure")),
        }
    }
}
