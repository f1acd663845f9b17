// MCP (Model Context Protocol) server exposing Open-Meteo as tools

pub mod dispatcher;
pub mod error;
pub mod fault;
pub mod protocol;
pub mod schema;
pub mod server;
pub mod tools;

pub use dispatcher::Dispatcher;
pub use error::ToolError;
pub use server::McpServer;
