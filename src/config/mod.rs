pub mod app;
pub mod error;
pub mod loader;

pub use app::{AppConfig, MemoryConfig, WeatherConfig};
pub use error::ConfigError;
pub use loader::{ENV_MCP_SERVER_URL, ENV_MODEL, ensure_env_loaded};
