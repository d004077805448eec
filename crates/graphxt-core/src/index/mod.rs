//! Index structures used by the step algorithms.
//!
//! - [`IndexedMinHeap`] - binary min-heap addressable by key, for priority
//!   queues whose priorities change while entries are queued

mod heap;

pub use heap::IndexedMinHeap;
