//! CLI command definitions

use clap::Args;
use std::path::PathBuf;

/// Run the built-in demo graph
#[derive(Debug, Args, Clone)]
pub struct GraphCommand {
    /// Initial value of `foo`
    #[arg(long, default_value = "baz")]
    pub foo: String,

    /// Print the final state and run record as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run a pipeline
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Path to pipeline YAML file
    #[arg(short, long)]
    pub file: PathBuf,

    /// Override the initial value of `foo`
    #[arg(long)]
    pub foo: Option<String>,

    /// Print the final state and run record as JSON
    #[arg(long)]
    pub json: bool,
}

/// Validate a pipeline configuration
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Path to pipeline YAML file
    #[arg(short, long)]
    pub file: PathBuf,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Stream a chat completion
#[derive(Debug, Args, Clone)]
pub struct ChatCommand {
    /// Model name (overrides config)
    #[arg(long)]
    pub model: Option<String>,

    /// Replace the final user question
    #[arg(long)]
    pub prompt: Option<String>,
}
