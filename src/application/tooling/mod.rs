//! Remote tool gateway: MCP transport, catalog and receiver filtering.

mod catalog;
pub mod envelope;
mod error;
mod interface;
mod manager;
pub mod receiver;
pub mod transport;

pub use catalog::{ToolCatalog, ToolDescriptor, prefixed_name};
pub use envelope::{ToolOutput, unwrap_result};
pub use error::{ToolError, ToolInvokeError};
pub use interface::{ServerToolInfo, Tool, ToolServerInterface};
pub use manager::McpGateway;
pub use receiver::{AllowList, RECEIVER_TOOL_NAMES};
pub use transport::HttpTransport;
