//! Append-only chronological record of state-changing occurrences.
//!
//! The log is consumed by observability and UI collaborators outside the
//! engine. Entries are immutable once written and never removed.

use serde::{Deserialize, Serialize};

/// One event, stamped with the in-game clock at the time it was logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEntry {
    pub day: u32,
    pub hour: u32,
    pub message: String,
}

/// The game's event history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    entries: Vec<EventEntry>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, day: u32, hour: u32, message: impl Into<String>) {
        self.entries.push(EventEntry {
            day,
            hour,
            message: message.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[EventEntry] {
        &self.entries
    }

    /// The most recent `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> &[EventEntry] {
        &self.entries[self.entries.len().saturating_sub(n)..]
    }
}
