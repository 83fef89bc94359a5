//! Undo/redo over whole-document snapshots.

use crate::config::DEFAULT_HISTORY_LIMIT;
use crate::element::Element;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

// Use web_time for WASM compatibility
#[cfg(target_arch = "wasm32")]
use web_time::{SystemTime, UNIX_EPOCH};

#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

/// One undoable unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub before: Vec<Element>,
    pub after: Vec<Element>,
    pub description: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl HistoryEntry {
    fn new(before: Vec<Element>, after: Vec<Element>, description: String) -> Self {
        Self {
            before,
            after,
            description,
            timestamp: now_millis(),
        }
    }
}

pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Two snapshots are equal when they have the same length and every
/// element of `after` has a same-id counterpart in `before` with an
/// identical serialized form.
pub fn snapshots_equal(before: &[Element], after: &[Element]) -> bool {
    if before.len() != after.len() {
        return false;
    }
    after.iter().all(|el| {
        before
            .iter()
            .find(|other| other.id() == el.id())
            .is_some_and(|other| {
                match (serde_json::to_value(other), serde_json::to_value(el)) {
                    (Ok(a), Ok(b)) => a == b,
                    _ => false,
                }
            })
    })
}

/// Staged state of an open batch.
#[derive(Debug, Default)]
struct BatchState {
    depth: usize,
    description: String,
    before: Option<Vec<Element>>,
    after: Option<Vec<Element>>,
}

/// Handle returned by [`History::start_batch`].
///
/// Consume it with [`Batch::execute`] to record one consolidated entry,
/// or [`Batch::clear`] to cancel the gesture.
#[derive(Debug)]
#[must_use = "a batch must be executed or cleared"]
pub struct Batch {
    _private: (),
}

impl Batch {
    /// Close this level of the batch. At the outermost level, pushes one
    /// entry from the captured before-snapshot to the staged after-snapshot.
    /// Returns true if an entry was recorded.
    pub fn execute(self, history: &mut History) -> bool {
        history.end_batch()
    }

    /// Abandon the batch at every nesting level without recording anything.
    pub fn clear(self, history: &mut History) {
        history.cancel_batch();
    }
}

/// Bounded undo stack, redo stack and batching state.
#[derive(Debug)]
pub struct History {
    undo_stack: VecDeque<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
    limit: usize,
    batch: BatchState,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            limit,
            batch: BatchState::default(),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Record a change. Ignored while a batch is open or when the two
    /// snapshots are equal.
    pub fn record_change(
        &mut self,
        before: Vec<Element>,
        after: Vec<Element>,
        description: impl Into<String>,
    ) -> bool {
        if self.is_batching() {
            return false;
        }
        self.push(before, after, description.into())
    }

    fn push(&mut self, before: Vec<Element>, after: Vec<Element>, description: String) -> bool {
        if snapshots_equal(&before, &after) {
            return false;
        }
        log::debug!("History: recorded '{description}'");
        self.undo_stack
            .push_back(HistoryEntry::new(before, after, description));
        while self.undo_stack.len() > self.limit {
            self.undo_stack.pop_front();
        }
        self.redo_stack.clear();
        true
    }

    /// Open a batch. Only the outermost call captures `before` and the description.
    pub fn start_batch(&mut self, description: impl Into<String>, before: Vec<Element>) -> Batch {
        if self.batch.depth == 0 {
            self.batch.description = description.into();
            self.batch.before = Some(before);
            self.batch.after = None;
            log::debug!("History: started batch '{}'", self.batch.description);
        }
        self.batch.depth += 1;
        Batch { _private: () }
    }

    /// Stage the after-snapshot of the open batch. The last call wins.
    pub fn complete_batch(&mut self, after: Vec<Element>) {
        if self.is_batching() {
            self.batch.after = Some(after);
        }
    }

    pub fn is_batching(&self) -> bool {
        self.batch.depth > 0
    }

    pub fn batch_depth(&self) -> usize {
        self.batch.depth
    }

    fn end_batch(&mut self) -> bool {
        match self.batch.depth {
            0 => false,
            1 => {
                let state = std::mem::take(&mut self.batch);
                let Some(before) = state.before else {
                    return false;
                };
                let after = state.after.unwrap_or_else(|| before.clone());
                self.push(before, after, state.description)
            }
            _ => {
                self.batch.depth -= 1;
                false
            }
        }
    }

    fn cancel_batch(&mut self) {
        if self.is_batching() {
            log::debug!("History: cancelled batch '{}'", self.batch.description);
        }
        self.batch = BatchState::default();
    }

    /// Pop the newest entry and return its before-snapshot.
    pub fn undo(&mut self) -> Option<Vec<Element>> {
        let entry = self.undo_stack.pop_back()?;
        log::debug!("History: undo '{}'", entry.description);
        let snapshot = entry.before.clone();
        self.redo_stack.push(entry);
        Some(snapshot)
    }

    /// Re-apply the most recently undone entry and return its after-snapshot.
    pub fn redo(&mut self) -> Option<Vec<Element>> {
        let entry = self.redo_stack.pop()?;
        log::debug!("History: redo '{}'", entry.description);
        let snapshot = entry.after.clone();
        self.undo_stack.push_back(entry);
        Some(snapshot)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Description of the entry `undo` would revert.
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.back().map(|e| e.description.as_str())
    }

    /// Description of the entry `redo` would re-apply.
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().map(|e| e.description.as_str())
    }

    /// Undo entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.undo_stack.iter()
    }

    pub fn clear_history(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
