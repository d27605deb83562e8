//! Command-line interface

pub mod commands;
pub mod output;
pub mod terminal_output;

use crate::core::config::AppConfig;
use clap::{Parser, Subcommand};
use commands::{ChatCommand, GraphCommand, RunCommand, ValidateCommand};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::info;

/// Linear state pipelines and a streaming chat client
#[derive(Debug, Parser, Clone)]
#[command(name = "lingraph")]
#[command(author = "lingraph contributors")]
#[command(version = "0.1.0")]
#[command(about = "Run linear state pipelines and stream chat completions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to application config file (proxy and chat settings)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Skip writing the proxy environment variables
    #[arg(long, global = true)]
    pub direct: bool,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the built-in w_1 -> w_2 -> w_3 graph
    Graph(GraphCommand),

    /// Run a pipeline from a YAML file
    Run(RunCommand),

    /// Validate a pipeline configuration
    Validate(ValidateCommand),

    /// Stream a chat completion with web search bound
    Chat(ChatCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}

/// Write the configured proxy variables unless `--direct` was given
///
/// Must run before any network client is built. Returns whether the
/// variables were written.
pub fn apply_proxy(cli: &Cli, config: &AppConfig) -> bool {
    if cli.direct {
        info!("Skipping proxy setup");
        return false;
    }
    config.proxy.apply();
    true
}
