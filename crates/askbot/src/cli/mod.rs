//! askbot cli definition and entrypoint.
mod ask;
mod chat;
#[cfg(test)]
mod test_utils;
pub mod ux;

use std::path::PathBuf;

use anyhow::{Context, Result};
use askbot_core::config::{Config, get_config};
use clap::{Parser, Subcommand};

use crate::log::setup_logging;

/// askbot - chat with a question answering service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show verbose logs.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Answer service endpoint, overrides the config file.
    #[arg(short, long, global = true)]
    endpoint: Option<String>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Ask a single question and print the answer.
    Ask {
        /// Question to ask.
        question: Vec<String>,
    },
    /// Chat interactively.
    Chat,
}

/// Runs the main CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        setup_logging().context("Failed to set up logging")?;
    }

    let config = load_config(cli.config, cli.endpoint)?;

    match cli.command {
        Commands::Ask { question } => ask::execute(&question.join(" "), &config).await,
        Commands::Chat => chat::execute(&config).await,
    }
}

fn load_config(path: Option<PathBuf>, endpoint: Option<String>) -> Result<Config> {
    get_config(path)
        .context("Failed to load configuration")?
        .with_endpoint(endpoint)
        .context("Invalid endpoint override")
}
