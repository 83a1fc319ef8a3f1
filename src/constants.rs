//! Application constants
//!
//! Single source of truth for endpoints, names and other fixed values.

/// Default MCP endpoint of the cheqd tool server
pub const DEFAULT_MCP_SERVER_URL: &str = "http://localhost:3001/mcp";

/// Default model identifier handed to the hosting runtime
pub const DEFAULT_MODEL: &str = "openai/gpt-4o";

/// Server name used to prefix every remote tool (`cheqd_list-did`, ...)
pub const MCP_SERVER_NAME: &str = "cheqd";

/// Client id announced during the MCP handshake
pub const MCP_CLIENT_ID: &str = "cheqd-mcp-client";

/// MCP protocol revision spoken by the HTTP transport
pub const PROTOCOL_VERSION: &str = "2025-06-18";

/// Display name of the assistant
pub const ASSISTANT_NAME: &str = "Weather Agent";

/// Number of messages kept in the rolling conversation window
pub const DEFAULT_LAST_MESSAGES: usize = 20;

/// Network used when the bootstrap creates a DID
pub const BOOTSTRAP_NETWORK: &str = "testnet";

/// Key of the local weather tool in the assistant tool mapping
pub const WEATHER_TOOL_KEY: &str = "weatherTool";

/// Default configuration file path
pub const CONFIG_PATH: &str = "config/assistant.toml";

/// Default environment file path
pub const ENV_PATH: &str = ".env";

/// Open-Meteo geocoding endpoint
pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

/// Open-Meteo forecast endpoint
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
