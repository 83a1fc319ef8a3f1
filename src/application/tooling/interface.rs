use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use super::error::{ToolError, ToolInvokeError};

/// Tool as advertised by `tools/list`, before server prefixing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerToolInfo {
    pub name: String,
    pub description: Option<String>,
    pub input_schema: Option<Value>,
}

impl ServerToolInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            input_schema: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Connection to a single MCP server
#[async_trait]
pub trait ToolServerInterface: Send + Sync {
    /// Name the server's tools are prefixed with
    fn server_name(&self) -> &str;

    async fn list_tools(&self) -> Result<Vec<ServerToolInfo>, ToolInvokeError>;

    async fn call_tool(&self, tool: &str, arguments: Value) -> Result<Value, ToolInvokeError>;

    async fn server_instructions(&self) -> Option<String> {
        None
    }

    /// Tear down the session. Later calls may reconnect.
    async fn close(&self) -> Result<(), ToolInvokeError> {
        Ok(())
    }
}

/// Anything the assistant can call with a context object
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> Option<&str>;

    fn input_schema(&self) -> Option<&Value>;

    async fn execute(&self, context: Value) -> Result<Value, ToolError>;
}
