//! A mock answer service for unit testing purposes.
use crate::service::{AnswerService, AskError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replies to each question with the next scripted result, in order.
///
/// Records every query it receives. Panics if asked more questions than
/// were scripted, which catches turns that issue unexpected requests.
#[derive(Debug, Default)]
pub struct ScriptedAnswerService {
    replies: Mutex<VecDeque<Result<String, AskError>>>,
    queries: Mutex<Vec<String>>,
}

impl ScriptedAnswerService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(self, text: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(text.to_string()));
        self
    }

    pub fn fail(self, err: AskError) -> Self {
        self.replies.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnswerService for ScriptedAnswerService {
    async fn ask(&self, query: &str) -> Result<String, AskError> {
        self.queries.lock().unwrap().push(query.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("ScriptedAnswerService ran out of replies")
    }
}
