use super::AppConfig;
use super::error::ConfigError;
use crate::constants::{CONFIG_PATH, ENV_PATH};
use dotenvy::from_filename;
use serde::Deserialize;
use std::env;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Once;
use tracing::debug;

static ENV_LOADER: Once = Once::new();

/// Environment variable overriding the MCP endpoint
pub const ENV_MCP_SERVER_URL: &str = "MCP_SERVER_URL";

/// Environment variable overriding the model identifier
pub const ENV_MODEL: &str = "MODEL";

/// Raw configuration structure for deserialization from TOML
#[derive(Debug, Deserialize, Default)]
pub(super) struct RawConfig {
    pub mcp_server_url: Option<String>,
    pub server_name: Option<String>,
    pub client_id: Option<String>,
    pub model: Option<String>,
    pub assistant_name: Option<String>,
    #[serde(default)]
    pub memory: RawMemory,
    #[serde(default)]
    pub weather: RawWeather,
}

#[derive(Debug, Deserialize, Default)]
pub(super) struct RawMemory {
    pub last_messages: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
pub(super) struct RawWeather {
    pub geocoding_url: Option<String>,
    pub forecast_url: Option<String>,
}

/// Ensures environment variables are loaded from `.env`
pub fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| {
        let _ = from_filename(ENV_PATH);
    });
}

/// Load and validate configuration from a file path
///
/// An explicit path must exist. The default path is optional.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    ensure_env_loaded();
    let raw = match path {
        Some(path) => read_config(path)?,
        None => {
            let default_path = Path::new(CONFIG_PATH);
            if default_path.exists() {
                read_config(default_path)?
            } else {
                debug!(path = CONFIG_PATH, "No configuration file, using defaults");
                RawConfig::default()
            }
        }
    };
    build_config(raw, |key| env::var(key).ok())
}

fn read_config(path: &Path) -> Result<RawConfig, ConfigError> {
    debug!(path = %path.display(), "Reading assistant configuration file");

    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub(super) fn build_config<F>(parsed: RawConfig, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = AppConfig::default();

    if let Some(url) = parsed.mcp_server_url {
        config.mcp_server_url = url;
    }
    if let Some(name) = parsed.server_name {
        config.server_name = name;
    }
    if let Some(client_id) = parsed.client_id {
        config.client_id = client_id;
    }
    if let Some(model) = parsed.model {
        config.model = model;
    }
    if let Some(name) = parsed.assistant_name {
        config.assistant_name = name;
    }
    if let Some(last_messages) = parsed.memory.last_messages {
        config.memory.last_messages = last_messages;
    }
    if let Some(url) = parsed.weather.geocoding_url {
        config.weather.geocoding_url = url;
    }
    if let Some(url) = parsed.weather.forecast_url {
        config.weather.forecast_url = url;
    }

    // Blank variables count as unset.
    let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
    if let Some(url) = non_empty(ENV_MCP_SERVER_URL) {
        debug!(url = %url, "MCP server url taken from environment");
        config.mcp_server_url = url;
    }
    if let Some(model) = non_empty(ENV_MODEL) {
        debug!(model = %model, "Model taken from environment");
        config.model = model;
    }

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_MCP_SERVER_URL, DEFAULT_MODEL};
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_file_or_env() {
        let config = build_config(RawConfig::default(), lookup_from(&[])).expect("config");
        assert_eq!(config.mcp_server_url, DEFAULT_MCP_SERVER_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.server_name, "cheqd");
        assert_eq!(config.memory.last_messages, 20);
    }

    #[test]
    fn environment_wins_over_file() {
        let raw: RawConfig = toml::from_str(
            r#"
mcp_server_url = "http://file-host:9000/mcp"
model = "file/model"
"#,
        )
        .expect("toml");
        let config = build_config(
            raw,
            lookup_from(&[
                (ENV_MCP_SERVER_URL, "http://env-host:3001/mcp"),
                (ENV_MODEL, "anthropic/claude"),
            ]),
        )
        .expect("config");
        assert_eq!(config.mcp_server_url, "http://env-host:3001/mcp");
        assert_eq!(config.model, "anthropic/claude");
    }

    #[test]
    fn blank_environment_values_are_ignored() {
        let config =
            build_config(RawConfig::default(), lookup_from(&[(ENV_MODEL, "   ")])).expect("config");
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn rejects_invalid_server_url() {
        let result = build_config(
            RawConfig::default(),
            lookup_from(&[(ENV_MCP_SERVER_URL, "not a url")]),
        );
        assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
    }

    #[test]
    fn rejects_empty_memory_window() {
        let raw: RawConfig = toml::from_str("[memory]\nlast_messages = 0\n").expect("toml");
        let result = build_config(raw, lookup_from(&[]));
        assert!(matches!(result, Err(ConfigError::InvalidMemoryWindow)));
    }
}
