use thiserror::Error;

/// Failures talking to an MCP server
#[derive(Debug, Error)]
pub enum ToolInvokeError {
    #[error("MCP server '{server}' transport error: {message}")]
    Transport { server: String, message: String },
    #[error("MCP server '{server}' answered with HTTP {status}")]
    Http { server: String, status: u16 },
    #[error("MCP server '{server}' returned invalid JSON: {source}")]
    InvalidJson {
        server: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("MCP server '{server}' returned JSON-RPC error {code}: {message}")]
    Rpc {
        server: String,
        code: i64,
        message: String,
    },
    #[error("MCP server '{server}' sent no response for '{method}'")]
    MissingResponse { server: String, method: String },
    #[error("MCP server '{server}' sent a malformed tool listing: {message}")]
    MalformedCatalog { server: String, message: String },
    #[error("tool '{tool}' on MCP server '{server}' failed: {message}")]
    ToolFailed {
        server: String,
        tool: String,
        message: String,
    },
}

impl ToolInvokeError {
    pub fn server(&self) -> &str {
        match self {
            ToolInvokeError::Transport { server, .. }
            | ToolInvokeError::Http { server, .. }
            | ToolInvokeError::InvalidJson { server, .. }
            | ToolInvokeError::Rpc { server, .. }
            | ToolInvokeError::MissingResponse { server, .. }
            | ToolInvokeError::MalformedCatalog { server, .. }
            | ToolInvokeError::ToolFailed { server, .. } => server,
        }
    }
}

/// Failures executing a tool from the assistant's tool mapping
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool requested: {0}")]
    UnknownTool(String),
    #[error("invalid input for tool '{tool}': {message}")]
    InvalidInput { tool: String, message: String },
    #[error(transparent)]
    Remote(#[from] ToolInvokeError),
    #[error(transparent)]
    Weather(#[from] crate::infrastructure::weather::WeatherError),
}
