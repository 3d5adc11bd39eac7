use serde::Serialize;
use std::collections::VecDeque;

use crate::backend::ScoreTag;

/// Default capacity shared by both history logs.
pub const HISTORY_CAPACITY: usize = 5;

/// Fixed-capacity, most-recent-first log with oldest-eviction on overflow.
///
/// Entries are only ever appended at the head and trimmed at the tail; nothing
/// reorders or mutates them in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundedHistory<T> {
    entries: VecDeque<T>,
    #[serde(skip)]
    capacity: usize,
}

impl<T> BoundedHistory<T> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Insert at the head, evicting the oldest entry once over capacity.
    pub fn push(&mut self, item: T) {
        self.entries.push_front(item);
        self.entries.truncate(self.capacity);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn head(&self) -> Option<&T> {
        self.entries.front()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T: PartialEq> BoundedHistory<T> {
    /// Push unless `item` equals the current head. Returns whether it was
    /// inserted. Only the head is compared; older duplicates are allowed.
    pub fn push_distinct(&mut self, item: T) -> bool {
        if self.head() == Some(&item) {
            return false;
        }
        self.push(item);
        true
    }
}

impl<T> Default for BoundedHistory<T> {
    fn default() -> Self {
        Self::new(HISTORY_CAPACITY)
    }
}

/// A stabilized prompt whose score resolved for the current epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredPromptRecord {
    pub text: String,
    pub score: ScoreTag,
}

/// A prompt the user explicitly submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmittedPromptRecord {
    pub text: String,
}

/// The two independent logs kept for the lifetime of a page context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryStore {
    pub scored: BoundedHistory<ScoredPromptRecord>,
    pub submitted: BoundedHistory<SubmittedPromptRecord>,
}

impl HistoryStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            scored: BoundedHistory::new(capacity),
            submitted: BoundedHistory::new(capacity),
        }
    }

    /// Empty both logs.
    pub fn clear(&mut self) {
        self.scored.clear();
        self.submitted.clear();
    }

    /// Submitted prompts, most recent first, as sent to the classifier.
    pub fn submitted_texts(&self) -> Vec<String> {
        self.submitted.iter().map(|r| r.text.clone()).collect()
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(HISTORY_CAPACITY)
    }
}
