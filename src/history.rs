//! Action journal.
//!
//! Keeps a capacity-bounded, in-memory log of registry mutations for the
//! `/history` endpoint. Oldest entries are dropped first. Lifetime is the
//! process lifetime; nothing is persisted.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;

/// One journaled action.
#[derive(Debug, Clone, Serialize)]
pub struct ActionEntry {
    /// When the action happened.
    pub at: DateTime<Utc>,
    /// Human-readable description, e.g. "Added channel 6 on 2.4GHz".
    pub message: String,
}

/// Bounded in-memory journal of registry actions.
#[derive(Debug)]
pub struct ActionLog {
    entries: RwLock<VecDeque<ActionEntry>>,
    capacity: usize,
    enabled: bool,
}

impl ActionLog {
    pub fn new(enabled: bool, capacity: usize) -> Self {
        Self {
            entries: RwLock::new(VecDeque::new()),
            capacity,
            enabled,
        }
    }

    /// Record an action. No-op when the journal is disabled.
    pub fn record(&self, message: impl Into<String>) {
        if !self.enabled || self.capacity == 0 {
            return;
        }
        let mut entries = self.entries.write();
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(ActionEntry {
            at: Utc::now(),
            message: message.into(),
        });
    }

    /// All retained entries, oldest first.
    pub fn entries(&self) -> Vec<ActionEntry> {
        self.entries.read().iter().cloned().collect()
    }
}
