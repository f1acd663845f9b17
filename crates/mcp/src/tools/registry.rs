// Tool trait and the ordered registry advertised to callers

use crate::error::ToolError;
use crate::protocol::ToolSchema;
use crate::schema::{ParameterSchema, ValidatedParams};
use std::collections::HashMap;
use std::sync::Arc;

/// Tool executor trait
///
/// The dispatcher validates arguments against `parameters()` before
/// `invoke` is ever called.
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Argument contract, also the source of the advertised input schema.
    fn parameters(&self) -> &ParameterSchema;

    /// Get the tool schema for MCP
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.parameters().to_json_schema(),
        }
    }

    /// Execute the tool with validated arguments
    async fn invoke(&self, params: ValidatedParams) -> Result<serde_json::Value, ToolError>;
}

/// Tool registry for managing available tools
///
/// Keeps registration order so `tools/list` is stable.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any earlier tool with the same name
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        match self.index.get(&name) {
            Some(&i) => {
                tracing::warn!(tool = %name, "Replacing previously registered tool");
                self.tools[i] = tool;
            }
            None => {
                self.index.insert(name, self.tools.len());
                self.tools.push(tool);
            }
        }
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.index.get(name).map(|&i| self.tools[i].clone())
    }

    /// List all tool schemas in registration order
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        self.tools.iter().map(|t| t.schema()).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Check if a tool exists
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
