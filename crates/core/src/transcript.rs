//! Messages shown in a chat and the ordered transcript that holds them.
use serde::{Deserialize, Serialize};

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    User,
    Bot,
}

impl From<Author> for String {
    fn from(val: Author) -> Self {
        val.as_str().into()
    }
}

impl Author {
    pub fn as_str(&self) -> &'static str {
        match &self {
            Author::User => "user",
            Author::Bot => "bot",
        }
    }
}

/// A single chat message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    author: Author,
    text: String,
    error: bool,
}

impl Message {
    /// Creates a message submitted by the user.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            author: Author::User,
            text: text.into(),
            error: false,
        }
    }

    /// Creates a bot message carrying an answer.
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            author: Author::Bot,
            text: text.into(),
            error: false,
        }
    }

    /// Creates a bot message that reports a failed turn.
    pub fn bot_error(text: impl Into<String>) -> Self {
        Self {
            author: Author::Bot,
            text: text.into(),
            error: true,
        }
    }

    pub fn author(&self) -> Author {
        self.author
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_error(&self) -> bool {
        self.error
    }
}

/// Identifies an in-flight request placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PendingId(u64);

/// An entry as it appears in the chat view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Message(Message),
    /// Transient "thinking" marker while an answer is awaited.
    Pending(PendingId),
}

/// Ordered chat history. Messages are only ever appended; placeholders come
/// and go around them.
#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<Entry>,
    next_pending: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message at the end of the transcript.
    pub fn push(&mut self, message: Message) {
        self.entries.push(Entry::Message(message));
    }

    /// Inserts a placeholder for a request that is about to be sent.
    pub fn begin_pending(&mut self) -> PendingId {
        let id = PendingId(self.next_pending);
        self.next_pending += 1;
        self.entries.push(Entry::Pending(id));
        id
    }

    /// Removes the placeholder with the given id. Returns false if it was
    /// already gone.
    pub fn finish_pending(&mut self, id: PendingId) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|entry| !matches!(entry, Entry::Pending(p) if *p == id));
        self.entries.len() != before
    }

    /// All entries in display order, placeholders included.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Messages in display order, without placeholders.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Message(message) => Some(message),
            Entry::Pending(_) => None,
        })
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages().last()
    }

    pub fn has_pending(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| matches!(entry, Entry::Pending(_)))
    }

    /// Number of messages, placeholders excluded.
    pub fn len(&self) -> usize {
        self.messages().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
