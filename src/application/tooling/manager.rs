use super::catalog::{ToolCatalog, ToolDescriptor};
use super::error::ToolInvokeError;
use super::interface::ToolServerInterface;
use super::receiver::AllowList;
use super::transport::HttpTransport;
use crate::config::AppConfig;
use reqwest::Url;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Client for the remote tool gateway.
///
/// Every catalog request goes to the server; nothing is cached between calls.
#[derive(Clone)]
pub struct McpGateway {
    server: Arc<dyn ToolServerInterface>,
    allow_list: AllowList,
}

impl McpGateway {
    /// Gateway speaking Streamable HTTP to the configured endpoint
    pub fn connect(config: &AppConfig) -> Result<Self, ToolInvokeError> {
        let endpoint = Url::parse(&config.mcp_server_url).map_err(|err| {
            ToolInvokeError::Transport {
                server: config.server_name.clone(),
                message: format!("invalid endpoint '{}': {err}", config.mcp_server_url),
            }
        })?;
        debug!(
            server = %config.server_name,
            endpoint = %endpoint,
            client = %config.client_id,
            "Creating MCP gateway"
        );
        let transport = HttpTransport::new(&config.server_name, &config.client_id, endpoint);
        Ok(Self::with_server(Arc::new(transport)))
    }

    /// Gateway over an existing server connection
    pub fn with_server(server: Arc<dyn ToolServerInterface>) -> Self {
        Self {
            server,
            allow_list: AllowList::receiver(),
        }
    }

    pub fn with_allow_list(mut self, allow_list: AllowList) -> Self {
        self.allow_list = allow_list;
        self
    }

    pub fn server_name(&self) -> &str {
        self.server.server_name()
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    /// Full catalog, keyed by server-prefixed name
    pub async fn get_tools(&self) -> Result<ToolCatalog, ToolInvokeError> {
        let listing = self.server.list_tools().await?;
        let catalog: ToolCatalog = listing
            .into_iter()
            .map(|info| ToolDescriptor::new(info, Arc::clone(&self.server)))
            .collect();
        debug!(
            server = self.server_name(),
            count = catalog.len(),
            "Loaded MCP tool catalog"
        );
        Ok(catalog)
    }

    /// Catalog narrowed to the receiver allow-list
    pub async fn get_receiver_tools(&self) -> Result<ToolCatalog, ToolInvokeError> {
        let all_tools = self.get_tools().await?;
        let filtered = self.allow_list.filter(&all_tools, self.server_name());
        info!(
            server = self.server_name(),
            tools = ?filtered.names(),
            "Loaded receiver tools"
        );
        Ok(filtered)
    }

    pub async fn server_instructions(&self) -> Option<String> {
        self.server.server_instructions().await
    }

    /// Close the underlying session
    pub async fn disconnect(&self) {
        if let Err(err) = self.server.close().await {
            warn!(server = self.server_name(), %err, "Failed to close MCP session");
        }
    }
}
