//! Ring Buffer Implementation

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default buffer capacity (60 samples = 1 s at 60 fps)
pub const DEFAULT_CAPACITY: usize = 60;

/// Fixed-capacity FIFO buffer
///
/// Holds exactly `capacity` entries once full; each further push evicts the
/// oldest entry. Entries are never mutated after insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RingBuffer<T> {
    /// Entries, oldest at the front
    storage: VecDeque<T>,
    /// Maximum number of entries
    capacity: usize,
    /// Total entries ever pushed (for statistics)
    total_written: usize,
}

impl<T> RingBuffer<T> {
    /// Create a new ring buffer with given capacity (at least 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            storage: VecDeque::with_capacity(capacity),
            capacity,
            total_written: 0,
        }
    }

    /// Create a buffer with default capacity (60 entries)
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }

    /// Push an entry, returning the evicted oldest entry if the buffer was full
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.storage.len() >= self.capacity {
            self.storage.pop_front()
        } else {
            None
        };
        self.storage.push_back(item);
        self.total_written += 1;
        evicted
    }

    /// Number of entries currently held
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.storage.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get fill ratio (0.0 to 1.0)
    pub fn fill_ratio(&self) -> f64 {
        self.storage.len() as f64 / self.capacity as f64
    }

    /// Most recent entry
    pub fn latest(&self) -> Option<&T> {
        self.storage.back()
    }

    /// Oldest entry still held
    pub fn oldest(&self) -> Option<&T> {
        self.storage.front()
    }

    /// Iterate oldest to newest
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.storage.iter()
    }

    /// Iterate over the last `count` entries, most recent first
    pub fn iter_recent(&self, count: usize) -> impl Iterator<Item = &T> {
        self.storage.iter().rev().take(count)
    }

    /// Total entries ever pushed, including evicted ones
    pub fn total_written(&self) -> usize {
        self.total_written
    }

    /// Drop every entry; statistics restart as well
    pub fn clear(&mut self) {
        self.storage.clear();
        self.total_written = 0;
    }
}

impl<T: Clone> RingBuffer<T> {
    /// Read the last N entries (most recent first)
    pub fn read_last(&self, count: usize) -> Vec<T> {
        self.iter_recent(count).cloned().collect()
    }

    /// Copy of all entries, oldest first
    pub fn to_vec(&self) -> Vec<T> {
        self.storage.iter().cloned().collect()
    }
}

impl<T> Default for RingBuffer<T> {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}
