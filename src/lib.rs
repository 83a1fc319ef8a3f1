pub mod application;
pub mod cli;
pub mod config;
pub mod constants;
pub mod domain;
pub mod infrastructure;

pub use application::agent::{Assistant, AssistantConfig, AssistantError, ConversationMemory};
pub use application::identity::{BootstrapError, Identity, bootstrap_identity};
pub use application::tooling::{McpGateway, ToolCatalog, ToolError, ToolInvokeError};
pub use cli::{Cli, Command};
pub use config::AppConfig;
pub use domain::types;
pub use infrastructure::weather;

use serde_json::{Value, json};
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt};

pub async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    init_tracing();
    let command = cli.command.clone().unwrap_or(Command::Describe);
    debug!(?command, config = ?cli.config, "CLI arguments parsed");

    let config = AppConfig::load(cli.config.as_deref())?;
    info!(
        endpoint = config.mcp_server_url.as_str(),
        model = config.model.as_str(),
        "Loaded configuration"
    );

    match command {
        Command::Describe => {
            let assistant = start(&config).await?;
            let rendered = serde_json::to_string_pretty(&assistant.snapshot());
            assistant.shutdown().await;
            println!("{}", rendered?);
        }
        Command::Tools => {
            let gateway = McpGateway::connect(&config)?;
            let tools = gateway.get_receiver_tools().await;
            let instructions = gateway.server_instructions().await;
            gateway.disconnect().await;
            if let Some(instructions) = instructions {
                println!("# {}", instructions.trim());
            }
            for tool in tools?.iter() {
                match tool.info().description.as_deref() {
                    Some(description) => println!("{}\t{description}", tool.name()),
                    None => println!("{}", tool.name()),
                }
            }
        }
        Command::Bootstrap => {
            let gateway = McpGateway::connect(&config)?;
            let outcome = bootstrap_identity(&gateway).await;
            gateway.disconnect().await;
            let identity = outcome?;
            println!("{}", serde_json::to_string_pretty(&identity)?);
        }
        Command::Call { tool, context } => {
            let context: Value = match context {
                Some(raw) => serde_json::from_str(&raw)?,
                None => json!({}),
            };
            let assistant = start(&config).await?;
            let result = assistant.call_tool(&tool, context).await;
            assistant.shutdown().await;
            println!("{}", serde_json::to_string_pretty(&result?)?);
        }
    }
    info!("Command finished");
    Ok(())
}

async fn start(config: &AppConfig) -> Result<Assistant, AssistantError> {
    Assistant::initialize(config)
        .await
        .inspect_err(|err| error!("{}", err.user_message()))
}

fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_level(true)
            .with_writer(std::io::stderr)
            .init();
    });
}
