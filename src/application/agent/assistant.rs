use super::errors::AssistantError;
use super::instructions::compose_instructions;
use super::memory::ConversationMemory;
use super::toolset::ToolSet;
use crate::application::identity::{Identity, bootstrap_identity};
use crate::application::tooling::{McpGateway, Tool, ToolCatalog, ToolError, unwrap_result};
use crate::config::{AppConfig, MemoryConfig};
use crate::constants::WEATHER_TOOL_KEY;
use crate::infrastructure::weather::WeatherTool;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Everything the hosting runtime needs to run the assistant. Fixed once built.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    name: String,
    instructions: String,
    model: String,
    tools: ToolSet,
    memory: MemoryConfig,
}

impl AssistantConfig {
    /// Receiver tools keyed by prefixed name, plus `weather` under [`WEATHER_TOOL_KEY`]
    pub fn build(app: &AppConfig, receiver_tools: &ToolCatalog, weather: Arc<dyn Tool>) -> Self {
        let mut tools = ToolSet::new();
        for descriptor in receiver_tools.iter() {
            tools.insert(descriptor.name(), Arc::new(descriptor.clone()) as Arc<dyn Tool>);
        }
        tools.insert(WEATHER_TOOL_KEY, weather);

        Self {
            name: app.assistant_name.clone(),
            instructions: compose_instructions(&app.server_name, receiver_tools),
            model: app.model.clone(),
            tools,
            memory: app.memory,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn tools(&self) -> &ToolSet {
        &self.tools
    }

    pub fn memory(&self) -> MemoryConfig {
        self.memory
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolSummary {
    pub key: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<Value>,
}

/// Serializable view of a constructed assistant
#[derive(Debug, Clone, Serialize)]
pub struct AssistantSnapshot {
    pub name: String,
    pub model: String,
    pub instructions: String,
    pub memory: MemoryConfig,
    pub tools: Vec<ToolSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<Identity>,
}

/// Assistant handle: configuration, the gateway backing its remote tools and the
/// identity resolved at startup.
pub struct Assistant {
    config: AssistantConfig,
    gateway: McpGateway,
    identity: Option<Identity>,
}

impl Assistant {
    /// Connect to the configured MCP server and build the assistant
    pub async fn initialize(app: &AppConfig) -> Result<Self, AssistantError> {
        app.validate()?;
        let gateway = McpGateway::connect(app)?;
        let weather: Arc<dyn Tool> = Arc::new(WeatherTool::from_config(&app.weather));
        Self::initialize_with(app, gateway, weather).await
    }

    /// Fetch receiver tools, make sure a DID exists, then construct.
    ///
    /// Only a failed receiver-tool fetch aborts. Bootstrap failures are logged and
    /// the assistant starts without an identity.
    pub async fn initialize_with(
        app: &AppConfig,
        gateway: McpGateway,
        weather: Arc<dyn Tool>,
    ) -> Result<Self, AssistantError> {
        let receiver_tools = gateway.get_receiver_tools().await?;
        let identity = ensure_identity(&gateway).await;
        let config = AssistantConfig::build(app, &receiver_tools, weather);
        info!(
            name = config.name(),
            model = config.model(),
            tools = config.tools().len(),
            has_identity = identity.is_some(),
            "Assistant initialized"
        );
        Ok(Self {
            config,
            gateway,
            identity,
        })
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn gateway(&self) -> &McpGateway {
        &self.gateway
    }

    pub fn snapshot(&self) -> AssistantSnapshot {
        let tools = self
            .config
            .tools()
            .iter()
            .map(|(key, tool)| ToolSummary {
                key: key.to_string(),
                name: tool.name().to_string(),
                description: tool.description().map(str::to_string),
                input_schema: tool.input_schema().cloned(),
            })
            .collect();
        AssistantSnapshot {
            name: self.config.name.clone(),
            model: self.config.model.clone(),
            instructions: self.config.instructions.clone(),
            memory: self.config.memory,
            tools,
            identity: self.identity.clone(),
        }
    }

    /// Execute a tool from the mapping and strip any text envelope from its result
    pub async fn call_tool(&self, key: &str, context: Value) -> Result<Value, ToolError> {
        let tool = self
            .config
            .tools()
            .get(key)
            .ok_or_else(|| ToolError::UnknownTool(key.to_string()))?;
        debug!(tool = key, "Executing tool");
        let raw = tool.execute(context).await?;
        Ok(unwrap_result(raw))
    }

    pub fn new_memory(&self) -> ConversationMemory {
        ConversationMemory::new(self.config.memory)
    }

    pub async fn shutdown(self) {
        self.gateway.disconnect().await;
        info!(name = self.config.name(), "Assistant shut down");
    }
}

async fn ensure_identity(gateway: &McpGateway) -> Option<Identity> {
    match bootstrap_identity(gateway).await {
        Ok(identity) => Some(identity),
        Err(err) if err.is_skipped() => {
            warn!(%err, "Skipping DID bootstrap");
            None
        }
        Err(err) => {
            error!(%err, "DID bootstrap failed, continuing without an identity");
            None
        }
    }
}
