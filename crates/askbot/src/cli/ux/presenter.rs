use askbot_core::transcript::{Author, Message};
use console::{Style, StyledObject};

/// Represents the type of a chat text, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatMessageType {
    /// The prompt for user input.
    Prompt,
    /// Label in front of a user message.
    User,
    /// Label in front of a bot message.
    Bot,
    /// Hints and other secondary information.
    Footer,
    /// An error message.
    Error,
}

/// Styles a string of text according to the specified `ChatMessageType`.
pub fn style_chat_text(text: &str, style: ChatMessageType) -> StyledObject<&str> {
    let style_obj = match style {
        ChatMessageType::Prompt => Style::new().blue().bold(),
        ChatMessageType::User => Style::new().blue(),
        ChatMessageType::Bot => Style::new().green(),
        ChatMessageType::Footer => Style::new().white().dim(),
        ChatMessageType::Error => Style::new().red().bold(),
    };
    style_obj.apply_to(text)
}

/// Renders a transcript message as a single labelled block of text.
pub fn format_message(message: &Message) -> String {
    match (message.author(), message.is_error()) {
        (Author::User, _) => format!(
            "{} {}",
            style_chat_text("you ›", ChatMessageType::User),
            message.text()
        ),
        (Author::Bot, false) => format!(
            "{} {}",
            style_chat_text("bot ›", ChatMessageType::Bot),
            message.text()
        ),
        (Author::Bot, true) => format!(
            "{} {}",
            style_chat_text("bot ›", ChatMessageType::Error),
            style_chat_text(message.text(), ChatMessageType::Error)
        ),
    }
}
