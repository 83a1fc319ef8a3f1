use super::error::ConfigError;
use crate::constants::{
    ASSISTANT_NAME, DEFAULT_FORECAST_URL, DEFAULT_GEOCODING_URL, DEFAULT_LAST_MESSAGES,
    DEFAULT_MCP_SERVER_URL, DEFAULT_MODEL, MCP_CLIENT_ID, MCP_SERVER_NAME,
};
use serde::Serialize;
use std::path::Path;

/// Rolling conversation window settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemoryConfig {
    pub last_messages: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            last_messages: DEFAULT_LAST_MESSAGES,
        }
    }
}

/// Open-Meteo endpoints used by the weather tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherConfig {
    pub geocoding_url: String,
    pub forecast_url: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
        }
    }
}

/// Application configuration: defaults, then `config/assistant.toml`, then environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub mcp_server_url: String,
    pub server_name: String,
    pub client_id: String,
    pub model: String,
    pub assistant_name: String,
    pub memory: MemoryConfig,
    pub weather: WeatherConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mcp_server_url: DEFAULT_MCP_SERVER_URL.to_string(),
            server_name: MCP_SERVER_NAME.to_string(),
            client_id: MCP_CLIENT_ID.to_string(),
            model: DEFAULT_MODEL.to_string(),
            assistant_name: ASSISTANT_NAME.to_string(),
            memory: MemoryConfig::default(),
            weather: WeatherConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a file path (or default path if None)
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        super::loader::load_config(path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_url("MCP server", &self.mcp_server_url)?;
        validate_url("geocoding", &self.weather.geocoding_url)?;
        validate_url("forecast", &self.weather.forecast_url)?;
        if self.server_name.trim().is_empty() {
            return Err(ConfigError::EmptyField("server_name"));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyField("model"));
        }
        if self.memory.last_messages == 0 {
            return Err(ConfigError::InvalidMemoryWindow);
        }
        Ok(())
    }
}

fn validate_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    reqwest::Url::parse(value)
        .map(|_| ())
        .map_err(|err| ConfigError::InvalidUrl {
            field,
            value: value.to_string(),
            message: err.to_string(),
        })
}
