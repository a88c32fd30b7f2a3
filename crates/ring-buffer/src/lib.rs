//! Bounded Ring Buffer
//!
//! Fixed-capacity FIFO storage for per-frame history. Pushing into a full
//! buffer evicts the oldest entry. A lock-guarded variant is provided for
//! hosts that read history from another thread.

mod buffer;
mod shared;

pub use buffer::{RingBuffer, DEFAULT_CAPACITY};
pub use shared::SharedRingBuffer;
