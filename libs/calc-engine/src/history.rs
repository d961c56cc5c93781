//! Bounded calculation history
//!
//! Keeps the most recent entries in insertion order. When full, the oldest
//! entry is evicted before the new one is appended.

use std::collections::VecDeque;

/// Maximum number of entries kept in the history
pub const HISTORY_CAPACITY: usize = 10;

/// FIFO ring of formatted history entries
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<String>,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(HISTORY_CAPACITY),
        }
    }

    /// Append an entry, evicting the oldest one when the ring is full
    pub fn push(&mut self, entry: impl Into<String>) {
        if self.entries.len() == HISTORY_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(entry.into());
        debug_assert!(self.entries.len() <= HISTORY_CAPACITY);
    }

    /// Entries from oldest to newest
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        HISTORY_CAPACITY
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
