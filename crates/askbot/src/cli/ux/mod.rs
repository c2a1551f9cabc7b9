mod presenter;
mod progress;
mod view;

pub use presenter::{ChatMessageType, format_message, style_chat_text};
pub use progress::GenerationSpinner;
pub use view::TerminalView;

/// Prints a formatted error message to stderr.
pub fn present_error(error: anyhow::Error) {
    let error_text = style_chat_text("ERROR:", ChatMessageType::Error);
    eprintln!("\n{error_text} {error:#}");
}
