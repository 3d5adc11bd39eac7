//! Rendering boundary.
//!
//! The pipeline never reasons about layout: after every state mutation it
//! hands a full [`UiState`] snapshot to a [`UiSink`] through the
//! [`UiSynchronizer`], which drops renders of unchanged state.

pub mod console;
pub mod style;

use crate::backend::{Destination, ScoreTag};
use crate::error::InputError;
use crate::state::{ScoredPromptRecord, Settings, SubmittedPromptRecord};

pub use console::ConsoleUi;

/// Everything a UI needs to draw the companion widgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub settings: Settings,
    pub score_history: Vec<ScoredPromptRecord>,
    pub submitted_history: Vec<SubmittedPromptRecord>,
    pub current_score: Option<ScoreTag>,
    pub pii_alert: bool,
    pub suggestion: Option<Destination>,
}

/// One-off messages outside the rendered state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Blocking precondition message the user can fix right away.
    Input(InputError),
    /// Confirmation of a user action (e.g. a copy to the clipboard).
    Info(String),
}

pub trait UiSink: Send {
    fn render(&mut self, state: &UiState);
    fn notify(&mut self, notice: &Notice);
}

/// Makes rendering idempotent: identical consecutive snapshots reach the
/// sink once.
pub struct UiSynchronizer<S> {
    sink: S,
    last: Option<UiState>,
}

impl<S: UiSink> UiSynchronizer<S> {
    pub fn new(sink: S) -> Self {
        Self { sink, last: None }
    }

    /// Render `state` unless it equals the last rendered snapshot. Returns
    /// whether the sink was called.
    pub fn sync(&mut self, state: UiState) -> bool {
        if self.last.as_ref() == Some(&state) {
            return false;
        }
        self.sink.render(&state);
        self.last = Some(state);
        true
    }

    pub fn notify(&mut self, notice: &Notice) {
        self.sink.notify(notice);
    }

    pub fn last(&self) -> Option<&UiState> {
        self.last.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
