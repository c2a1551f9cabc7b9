//! The remote question answering service, as seen by a chat turn.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AskError {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("Answer service responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Invalid response from answer service: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Response from answer service has no answer")]
    MissingAnswer,
}

/// Body of `POST <endpoint>/ask`.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct AskRequest<'a> {
    pub query: &'a str,
}

/// Expected body of a successful reply. Other fields are ignored.
#[derive(Deserialize, Debug)]
pub struct AskResponse {
    #[serde(default)]
    pub answer: Option<String>,
}

impl AskResponse {
    pub fn into_answer(self) -> Result<String, AskError> {
        self.answer.ok_or(AskError::MissingAnswer)
    }
}

/// Sends a question and returns the answer text.
///
/// Implementors own transport and wire format; the chat controller only sees
/// an answer or an [`AskError`].
#[async_trait]
pub trait AnswerService: Send + Sync {
    async fn ask(&self, query: &str) -> Result<String, AskError>;
}

#[async_trait]
impl<T: AnswerService + ?Sized> AnswerService for std::sync::Arc<T> {
    async fn ask(&self, query: &str) -> Result<String, AskError> {
        (**self).ask(query).await
    }
}

/// Formats an error with its full chain of causes, e.g.
/// `error sending request: client error (Connect): connection refused`.
pub fn describe_error(err: &(dyn std::error::Error + 'static)) -> String {
    let mut description = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        // Some wrappers repeat their inner error in their own message
        if !description.ends_with(&text) {
            description.push_str(": ");
            description.push_str(&text);
        }
        source = cause.source();
    }
    description
}
