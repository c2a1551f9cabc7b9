use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use askbot_core::controller::ChatTurnController;
use askbot_core::get_data_dir;
use clap::{CommandFactory, Parser, Subcommand};
use rustyline::completion::{Candidate, Completer};
use rustyline::error::ReadlineError;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Editor, Helper, Highlighter, Validator};
use tracing::debug;

use crate::cli::ux::{ChatMessageType, TerminalView, style_chat_text};

type Controller<W> = ChatTurnController<TerminalView<W>>;

// -------------
// REPL commands
// -------------
#[derive(Parser, Debug)]
#[command(multicall = true)]
struct CliCommand {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Show the conversation so far
    #[command(visible_alias = "h")]
    History,
    /// Exit the chat session
    #[command(visible_alias = "q", visible_alias = "quit")]
    Exit,
}

impl Command {
    /// Executes a REPL command.
    ///
    /// Returns `Ok(false)` if the REPL should exit.
    fn execute<W: Write>(self, controller: &mut Controller<W>) -> Result<bool> {
        match self {
            Command::History => {
                if controller.transcript().is_empty() {
                    println!("No messages yet.");
                } else {
                    let (view, transcript) = controller.view_and_transcript();
                    view.replay(transcript)?;
                }
                Ok(true)
            }
            Command::Exit => {
                println!("Bye!");
                Ok(false)
            }
        }
    }
}

/// Splits a REPL command line into arguments, falling back to whitespace
/// splitting when quotes are unbalanced.
fn parse_command_line(line: &str) -> Vec<String> {
    let trimmed_line = line.trim();
    shlex::split(trimmed_line).unwrap_or_else(|| {
        trimmed_line
            .split_whitespace()
            .map(|s| s.to_string())
            .collect()
    })
}

// ----------------
// Line editor help
// ----------------
#[derive(Debug)]
struct CompletionCandidate {
    text: String,
    display_string: String,
}

impl CompletionCandidate {
    fn new(text: &str) -> Self {
        let display_string = style_chat_text(text, ChatMessageType::Footer).to_string();
        Self {
            text: text.to_owned(),
            display_string,
        }
    }
}

impl Candidate for CompletionCandidate {
    fn display(&self) -> &str {
        &self.display_string
    }

    fn replacement(&self) -> &str {
        &self.text
    }
}

/// Completes and hints `/` commands.
#[derive(Helper, Validator, Highlighter)]
struct Repl {
    command_names: Vec<String>,
}

impl Repl {
    fn new() -> Self {
        let command_names = CliCommand::command()
            .get_subcommands()
            .flat_map(|c| c.get_name_and_visible_aliases())
            .map(|s| format!("/{s}"))
            .chain(std::iter::once("/help".to_string()))
            .collect::<Vec<_>>();
        Self { command_names }
    }

    /// Whether `line` names a REPL command. Other `/` lines, such as a
    /// question starting with a path, are chat input.
    fn is_command(&self, line: &str) -> bool {
        line.split_whitespace()
            .next()
            .is_some_and(|first| self.command_names.iter().any(|name| name == first))
    }
}

impl Completer for Repl {
    type Candidate = CompletionCandidate;

    fn complete(
        &self,
        line: &str,
        _pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> Result<(usize, Vec<Self::Candidate>), ReadlineError> {
        if !line.starts_with('/') {
            return Ok((0, Vec::new()));
        }

        let candidates = self
            .command_names
            .iter()
            .filter(|name| name.starts_with(line))
            .map(|name| CompletionCandidate::new(name))
            .collect();
        Ok((0, candidates))
    }
}

impl Hinter for Repl {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<Self::Hint> {
        if !line.starts_with('/') || pos < line.len() {
            return None;
        }
        self.command_names
            .iter()
            .find(|name| name.starts_with(line) && name.len() > line.len())
            .map(|name| name[line.len()..].into())
    }
}

fn history_path() -> Option<PathBuf> {
    get_data_dir().ok().map(|dir| dir.join("history.txt"))
}

/// Runs the interactive REPL for the chat session.
///
/// Input is not read while a turn is in flight; each submitted line is
/// awaited to completion before the next prompt.
pub async fn run<W: Write>(mut controller: Controller<W>, endpoint: &str) -> Result<()> {
    println!("Welcome to askbot! Asking {endpoint}. Type '/help' for commands, '/q' to exit.");

    let config = rustyline::Config::builder()
        .history_ignore_dups(true)?
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .build();

    let mut rl: Editor<Repl, DefaultHistory> = Editor::with_config(config)?;
    rl.set_helper(Some(Repl::new()));

    let history_file = history_path();
    if let Some(path) = &history_file
        && let Err(e) = rl.load_history(path)
    {
        debug!(error = %e, "No REPL history loaded");
    }

    let prompt = format!("\n{}", style_chat_text("> ", ChatMessageType::Prompt));
    let result: Result<()> = loop {
        debug_assert!(!controller.is_submitting());
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed_line = line.trim();
                if trimmed_line.is_empty() {
                    continue;
                }
                rl.add_history_entry(trimmed_line)?;

                if rl.helper().is_some_and(|repl| repl.is_command(trimmed_line)) {
                    match CliCommand::try_parse_from(parse_command_line(trimmed_line)) {
                        Ok(cli_command) => {
                            if !cli_command.command.execute(&mut controller)? {
                                break Ok(());
                            }
                        }
                        Err(e) => {
                            e.print()?;
                        }
                    }
                } else {
                    controller.submit(trimmed_line).await;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("Type /quit to exit.");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("\nBye!");
                break Ok(());
            }
            Err(err) => {
                break Err(err.into());
            }
        }
    };

    if let Some(path) = &history_file
        && let Err(e) = rl.save_history(path)
    {
        debug!(error = %e, "Failed to save REPL history");
    }
    result
}
