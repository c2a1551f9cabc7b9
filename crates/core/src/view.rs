//! Rendering hooks the chat controller drives.
use crate::transcript::{Entry, Transcript};

/// Presentation side of a chat.
///
/// The controller calls [`ChatView::render`] after every change to the
/// transcript, and [`ChatView::set_submitting`] when input must be disabled
/// or may be accepted again.
pub trait ChatView {
    fn render(&mut self, transcript: &Transcript);
    fn set_submitting(&mut self, submitting: bool);
}

impl<V: ChatView + ?Sized> ChatView for &mut V {
    fn render(&mut self, transcript: &Transcript) {
        (**self).render(transcript);
    }

    fn set_submitting(&mut self, submitting: bool) {
        (**self).set_submitting(submitting);
    }
}

/// A view call captured by [`RecordingView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Render(Vec<Entry>),
    Submitting(bool),
}

/// Headless view that keeps a log of everything it was asked to show.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub events: Vec<ViewEvent>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries from the most recent render, if any.
    pub fn last_render(&self) -> Option<&[Entry]> {
        self.events.iter().rev().find_map(|event| match event {
            ViewEvent::Render(entries) => Some(entries.as_slice()),
            ViewEvent::Submitting(_) => None,
        })
    }

    /// Submission state as last reported; input starts enabled.
    pub fn submitting(&self) -> bool {
        self.events
            .iter()
            .rev()
            .find_map(|event| match event {
                ViewEvent::Submitting(flag) => Some(*flag),
                ViewEvent::Render(_) => None,
            })
            .unwrap_or(false)
    }
}

impl ChatView for RecordingView {
    fn render(&mut self, transcript: &Transcript) {
        self.events
            .push(ViewEvent::Render(transcript.entries().to_vec()));
    }

    fn set_submitting(&mut self, submitting: bool) {
        self.events.push(ViewEvent::Submitting(submitting));
    }
}
