//! Lock-guarded ring buffer for multi-threaded hosts

use crate::RingBuffer;
use std::sync::{PoisonError, RwLock};

/// Ring buffer whose push-and-evict is atomic with respect to readers
///
/// Writers take the write lock for the whole push, so a reader snapshot never
/// observes a buffer that has grown past capacity or lost an entry without
/// gaining the new one.
#[derive(Debug)]
pub struct SharedRingBuffer<T> {
    inner: RwLock<RingBuffer<T>>,
}

impl<T> SharedRingBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(RingBuffer::new(capacity)),
        }
    }

    /// Push an entry, returning the evicted oldest entry if the buffer was full
    pub fn push(&self, item: T) -> Option<T> {
        // A panicking writer cannot leave the deque half-updated, so a
        // poisoned lock still guards consistent data.
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        guard.push(item)
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .capacity()
    }

    /// Run a closure against a consistent view of the buffer
    pub fn with_read<R>(&self, f: impl FnOnce(&RingBuffer<T>) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    pub fn clear(&self) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl<T: Clone> SharedRingBuffer<T> {
    /// Copy of all entries, oldest first
    pub fn snapshot(&self) -> Vec<T> {
        self.with_read(|buffer| buffer.to_vec())
    }
}
