use crate::host::KeyPress;
use std::time::Duration;
use tokio::time::Instant;

/// What the change detector reports to the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectorEvent {
    /// The user paused typing; carries the trimmed content.
    Stabilized(String),
    /// The user paused typing and the field is empty.
    Cleared,
    /// Unmodified Enter: explicit submission, bypasses the quiet window.
    Submitted(String),
}

/// Restartable single-shot timer over raw edit notifications.
///
/// Every edit replaces the captured content and pushes the deadline out by
/// the quiet window, so a burst of any density yields one emission.
#[derive(Debug)]
pub struct ChangeDetector {
    quiet: Duration,
    pending: Option<String>,
    deadline: Option<Instant>,
}

impl ChangeDetector {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
            deadline: None,
        }
    }

    pub fn record_edit(&mut self, content: String, now: Instant) {
        self.pending = Some(content);
        self.deadline = Some(now + self.quiet);
    }

    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Emit the captured content if the quiet window has elapsed.
    pub fn fire(&mut self, now: Instant) -> Option<DetectorEvent> {
        match self.deadline {
            Some(deadline) if deadline <= now => {}
            _ => return None,
        }
        self.deadline = None;
        let content = self.pending.take()?;
        let trimmed = content.trim();
        Some(if trimmed.is_empty() {
            DetectorEvent::Cleared
        } else {
            DetectorEvent::Stabilized(trimmed.to_string())
        })
    }

    /// Drop any pending emission (element swap, teardown).
    pub fn cancel(&mut self) {
        self.pending = None;
        self.deadline = None;
    }

    /// Immediate submit event for an unmodified Enter on non-empty content.
    /// Independent of the pending timer.
    pub fn on_key(key: &KeyPress, content: impl FnOnce() -> String) -> Option<DetectorEvent> {
        if !key.is_submit() {
            return None;
        }
        let content = content();
        let trimmed = content.trim();
        (!trimmed.is_empty()).then(|| DetectorEvent::Submitted(trimmed.to_string()))
    }
}
