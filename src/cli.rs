use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "identity-assistant",
    version,
    about = "Weather assistant with cheqd DID tools over MCP"
)]
pub struct Cli {
    /// TOML configuration file (defaults to config/assistant.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Initialize the assistant and print its configuration as JSON
    Describe,
    /// List the receiver tools offered by the MCP server
    Tools,
    /// Make sure a DID exists and print it
    Bootstrap,
    /// Invoke a tool from the assistant's tool mapping
    Call {
        tool: String,
        /// JSON object passed as the tool context
        #[arg(long)]
        context: Option<String>,
    },
}
