// Tool call dispatcher: lookup, validation, invocation, error wrapping

use crate::error::ToolError;
use crate::protocol::{CallToolResult, ListToolsResult};
use crate::schema::validate;
use crate::tools::ToolRegistry;
use tracing::{debug, error, info};

/// Routes `tools/call` requests through validation to the matching tool.
///
/// Holds no mutable state, so concurrent calls share one instance.
pub struct Dispatcher {
    registry: ToolRegistry,
}

impl Dispatcher {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn list_tools(&self) -> ListToolsResult {
        ListToolsResult {
            tools: self.registry.list_schemas(),
        }
    }

    /// Handle one tool call.
    ///
    /// Never fails: every error becomes a normal result holding a single
    /// `Error: ...` text block.
    pub async fn handle_call(&self, name: &str, arguments: serde_json::Value) -> CallToolResult {
        info!(tool = %name, "Tool call");
        debug!(tool = %name, arguments = %arguments, "Raw tool call");

        let value = match self.try_call(name, arguments).await {
            Ok(value) => value,
            Err(err) => return self.error_result(name, err),
        };

        match serde_json::to_string_pretty(&value) {
            Ok(text) => {
                debug!(tool = %name, bytes = text.len(), "Tool call succeeded");
                CallToolResult::text(text)
            }
            Err(e) => self.error_result(
                name,
                ToolError::Unexpected(anyhow::Error::new(e).context("Failed to render result")),
            ),
        }
    }

    async fn try_call(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let tool = self
            .registry
            .get(name)
            .ok_or_else(|| ToolError::UnknownOperation(name.to_string()))?;

        debug!(tool = %name, "Validating arguments");
        let params = validate(tool.parameters(), &arguments)
            .map_err(|source| ToolError::validation(name, source))?;

        debug!(tool = %name, "Arguments valid, invoking");
        tool.invoke(params).await
    }

    fn error_result(&self, name: &str, err: ToolError) -> CallToolResult {
        match &err {
            ToolError::Unexpected(e) => {
                error!(tool = %name, error = ?e, "Tool call failed unexpectedly")
            }
            ToolError::RemoteApi(e) => {
                error!(tool = %name, status = ?e.status(), error = %e, "Open-Meteo request failed")
            }
            other => error!(tool = %name, error = %other, "Rejected tool call"),
        }
        CallToolResult::error(err.caller_message())
    }
}
