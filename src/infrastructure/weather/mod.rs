//! Local weather tool backed by Open-Meteo.

mod client;
mod conditions;

pub use client::{GeoLocation, WeatherClient, WeatherError, WeatherReport};
pub use conditions::describe_weather_code;

use crate::application::tooling::{Tool, ToolError};
use crate::config::WeatherConfig;
use async_trait::async_trait;
use serde_json::{Value, json};

pub const WEATHER_TOOL_NAME: &str = "get-weather";

pub struct WeatherTool {
    client: WeatherClient,
    schema: Value,
}

impl WeatherTool {
    pub fn new(client: WeatherClient) -> Self {
        Self {
            client,
            schema: json!({
                "type": "object",
                "properties": {
                    "location": { "type": "string", "description": "City name" }
                },
                "required": ["location"]
            }),
        }
    }

    pub fn from_config(config: &WeatherConfig) -> Self {
        Self::new(WeatherClient::from_config(config))
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        WEATHER_TOOL_NAME
    }

    fn description(&self) -> Option<&str> {
        Some("Get current weather for a location")
    }

    fn input_schema(&self) -> Option<&Value> {
        Some(&self.schema)
    }

    async fn execute(&self, context: Value) -> Result<Value, ToolError> {
        let location = context
            .get("location")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|location| !location.is_empty())
            .ok_or_else(|| ToolError::InvalidInput {
                tool: WEATHER_TOOL_NAME.to_string(),
                message: "'location' must be a non-empty string".to_string(),
            })?;

        let report = self.client.current(location).await?;
        serde_json::to_value(report).map_err(|err| {
            ToolError::Weather(WeatherError::UnexpectedPayload(err.to_string()))
        })
    }
}
