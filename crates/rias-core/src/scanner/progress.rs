/// Progress accounting shared between the coordinator and its workers.
///
/// The counter is the only mutable state crossing worker boundaries. It is
/// owned by the run and handed to workers behind an `Arc`.
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic per-run counter of processed folders.
#[derive(Debug, Default)]
pub struct ProgressCounter {
    done: AtomicU64,
    total: u64,
}

impl ProgressCounter {
    /// Create a counter for a run over `total` targets.
    pub fn new(total: u64) -> Self {
        Self {
            done: AtomicU64::new(0),
            total,
        }
    }

    /// Atomically add one and return the new value.
    pub fn increment(&self) -> u64 {
        self.done.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Current value.
    pub fn get(&self) -> u64 {
        self.done.load(Ordering::Acquire)
    }

    pub fn total(&self) -> u64 {
        self.total
    }
}
