use std::io::Write;

use askbot_core::transcript::Transcript;
use askbot_core::view::ChatView;
use console::Term;
use tracing::warn;

use super::{GenerationSpinner, format_message};

/// Prints transcript messages to a terminal as they arrive.
///
/// Each message is printed once. A spinner stands in for the pending
/// placeholder while an answer is awaited. On an interactive terminal the
/// cursor is hidden while input is disabled.
pub struct TerminalView<W: Write> {
    out: W,
    placeholder: String,
    printed: usize,
    spinner: Option<GenerationSpinner>,
    cursor: Option<Term>,
    cursor_hidden: bool,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, placeholder: &str) -> Self {
        Self {
            out,
            placeholder: placeholder.to_string(),
            printed: 0,
            spinner: None,
            cursor: None,
            cursor_hidden: false,
        }
    }

    /// Hides the stdout cursor while submitting when `interactive` is set.
    pub fn interactive(self, interactive: bool) -> Self {
        if interactive {
            self.with_cursor(Term::stdout())
        } else {
            self
        }
    }

    /// Uses `term` to hide the cursor while submitting.
    pub fn with_cursor(mut self, term: Term) -> Self {
        self.cursor = Some(term);
        self
    }

    /// Prints every message of the transcript again.
    pub fn replay(&mut self, transcript: &Transcript) -> std::io::Result<()> {
        for message in transcript.messages() {
            writeln!(self.out, "{}", format_message(message))?;
        }
        self.out.flush()
    }

    fn print_new_messages(&mut self, transcript: &Transcript) -> std::io::Result<()> {
        for message in transcript.messages().skip(self.printed) {
            writeln!(self.out, "{}", format_message(message))?;
            self.printed += 1;
        }
        self.out.flush()
    }
}

impl<W: Write> ChatView for TerminalView<W> {
    fn render(&mut self, transcript: &Transcript) {
        // Clear the spinner first so it does not interleave with output
        if !transcript.has_pending()
            && let Some(spinner) = self.spinner.take()
        {
            spinner.clear();
        }

        if let Err(e) = self.print_new_messages(transcript) {
            warn!(error = %e, "Failed to print chat message");
        }

        if transcript.has_pending() && self.spinner.is_none() {
            self.spinner = Some(GenerationSpinner::new(self.placeholder.clone()));
        }
    }

    fn set_submitting(&mut self, submitting: bool) {
        let Some(term) = &self.cursor else {
            return;
        };

        let toggled = if submitting {
            term.hide_cursor()
        } else {
            term.show_cursor()
        };
        match toggled {
            Ok(()) => self.cursor_hidden = submitting,
            Err(e) => warn!(error = %e, "Failed to toggle cursor"),
        }
    }
}

impl<W: Write> Drop for TerminalView<W> {
    fn drop(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.clear();
        }
        if self.cursor_hidden
            && let Some(term) = &self.cursor
        {
            let _ = term.show_cursor();
        }
    }
}
