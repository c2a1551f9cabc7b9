//! One request/response cycle between the user and the answer service.
use tracing::{debug, warn};

use crate::config::ChatConfig;
use crate::service::{AnswerService, describe_error};
use crate::transcript::{Message, Transcript};
use crate::view::ChatView;

/// How a call to [`ChatTurnController::submit`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Input was blank; nothing happened.
    Ignored,
    /// The service answered and a bot message was appended.
    Answered,
    /// The request failed and an error message was appended.
    Failed,
}

/// Drives chat turns: owns the transcript and pushes every change to a view.
pub struct ChatTurnController<V: ChatView> {
    service: Box<dyn AnswerService>,
    view: V,
    transcript: Transcript,
    submitting: bool,
    error_prefix: String,
}

impl<V: ChatView> ChatTurnController<V> {
    pub fn new(service: Box<dyn AnswerService>, view: V, chat_config: &ChatConfig) -> Self {
        Self {
            service,
            view,
            transcript: Transcript::new(),
            submitting: false,
            error_prefix: chat_config.error_prefix.clone(),
        }
    }

    /// Runs one turn for `raw_input`.
    ///
    /// Blank input is ignored. Otherwise exactly one user message and exactly
    /// one bot message (answer or error) are appended, and submission is
    /// re-enabled before returning on every path.
    pub async fn submit(&mut self, raw_input: &str) -> TurnOutcome {
        let query = raw_input.trim();
        if query.is_empty() {
            debug!("Ignoring blank input");
            return TurnOutcome::Ignored;
        }

        self.transcript.push(Message::user(query));
        self.view.render(&self.transcript);

        self.set_submitting(true);
        let pending = self.transcript.begin_pending();
        self.view.render(&self.transcript);

        debug!("Turn started");
        let result = self.service.ask(query).await;

        self.transcript.finish_pending(pending);
        let outcome = match result {
            Ok(answer) => {
                self.transcript.push(Message::bot(answer));
                TurnOutcome::Answered
            }
            Err(err) => {
                let reason = describe_error(&err);
                warn!(error = %reason, "Turn failed");
                self.transcript
                    .push(Message::bot_error(format!("{}{reason}", self.error_prefix)));
                TurnOutcome::Failed
            }
        };
        self.view.render(&self.transcript);

        // Errors are values above, so this runs for every non-blank turn
        self.set_submitting(false);
        debug!(?outcome, "Turn finished");
        outcome
    }

    fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
        self.view.set_submitting(submitting);
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Borrows the view mutably alongside the transcript, e.g. to redraw it.
    pub fn view_and_transcript(&mut self) -> (&mut V, &Transcript) {
        (&mut self.view, &self.transcript)
    }
}
