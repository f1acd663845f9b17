pub mod catalog;
mod registry;
pub mod weather;

pub use catalog::{operations, weather_registry, OperationSpec};
pub use registry::{Tool, ToolRegistry};
pub use weather::{Operation, WeatherTool};
