pub mod types;

pub use types::{ChatMessage, MessageRole};
