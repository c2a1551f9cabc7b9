use anyhow::{Context, Result};
use askbot_core::config::Config;
use askbot_core::controller::ChatTurnController;
use askbot_core::get_answer_service;

use crate::cli::ux::TerminalView;

mod repl;

/// Executes the chat command, starting an interactive REPL session.
pub async fn execute(config: &Config) -> Result<()> {
    let service =
        get_answer_service(&config.service).context("Failed to initialize chat session")?;
    let view = TerminalView::new(std::io::stdout(), &config.chat.placeholder)
        .interactive(console::user_attended());
    let controller = ChatTurnController::new(service, view, &config.chat);

    repl::run(controller, &config.service.endpoint).await
}
