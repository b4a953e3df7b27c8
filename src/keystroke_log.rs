// Copyright (c) 2025 - Cowboy AI, Inc.
//! Bounded log of raw keystrokes, kept for display next to the debounced
//! output so the suppression is visible.

use serde::Serialize;
use std::collections::VecDeque;

/// FIFO-bounded sequence of raw input values
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeystrokeLog {
    entries: VecDeque<String>,
    capacity: usize,
}

impl KeystrokeLog {
    /// Create an empty log holding at most `capacity` entries
    ///
    /// A zero capacity is treated as one; `SearchConfig::validate` rejects it
    /// earlier.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a raw value, evicting the oldest entry when full
    pub fn record(&mut self, raw: impl Into<String>) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(raw.into());
    }

    /// Entries from oldest to newest
    pub fn entries(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
