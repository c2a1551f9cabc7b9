use std::io::Write;

use anyhow::{Result, bail};
use askbot_core::config::Config;
use askbot_core::controller::{ChatTurnController, TurnOutcome};
use askbot_core::get_answer_service;

use crate::cli::ux::TerminalView;

/// Asks a single question and prints the exchange to stdout.
pub async fn execute(question: &str, config: &Config) -> Result<()> {
    match run_ask(question, config, std::io::stdout()).await? {
        TurnOutcome::Answered => Ok(()),
        TurnOutcome::Failed => bail!("No answer received"),
        TurnOutcome::Ignored => bail!("Question is empty"),
    }
}

async fn run_ask<W: Write>(question: &str, config: &Config, out: W) -> Result<TurnOutcome> {
    let service = get_answer_service(&config.service)?;
    let view = TerminalView::new(out, &config.chat.placeholder);
    let mut controller = ChatTurnController::new(service, view, &config.chat);

    Ok(controller.submit(question).await)
}
