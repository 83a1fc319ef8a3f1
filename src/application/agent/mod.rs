mod assistant;
mod errors;
pub mod instructions;
mod memory;
mod toolset;

pub use assistant::{Assistant, AssistantConfig, AssistantSnapshot, ToolSummary};
pub use errors::AssistantError;
pub use instructions::compose_instructions;
pub use memory::ConversationMemory;
pub use toolset::ToolSet;
