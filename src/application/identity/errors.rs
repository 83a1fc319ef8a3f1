use crate::application::tooling::ToolInvokeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("identity tool '{name}' is not offered by the MCP server")]
    MissingTool { name: String },
    #[error(transparent)]
    Gateway(#[from] ToolInvokeError),
}

impl BootstrapError {
    /// True when the bootstrap was skipped rather than failed
    pub fn is_skipped(&self) -> bool {
        matches!(self, BootstrapError::MissingTool { .. })
    }
}
