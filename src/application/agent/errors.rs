use crate::application::tooling::ToolInvokeError;
use crate::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error(transparent)]
    Gateway(#[from] ToolInvokeError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl AssistantError {
    pub fn user_message(&self) -> String {
        match self {
            AssistantError::Gateway(ToolInvokeError::Transport { server, .. }) => format!(
                "Cannot reach the '{server}' tool server. Check that it is running and MCP_SERVER_URL points at it."
            ),
            AssistantError::Gateway(err) => format!("Tool server error: {err}"),
            AssistantError::Config(err) => format!("Configuration error: {err}"),
        }
    }
}
