//! Question id generation.

use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Source of ids for emitted questions.
pub trait IdGenerator: Send + Sync {
    /// Return an id never handed out before by this generator.
    fn next_id(&self) -> i64;
}

/// Monotonic counter, safe to share between concurrent callers.
#[derive(Debug)]
pub struct SequentialIds {
    next: AtomicI64,
}

impl SequentialIds {
    pub fn starting_at(seed: i64) -> Self {
        Self {
            next: AtomicI64::new(seed),
        }
    }

    /// Seed from the current time in milliseconds so ids keep increasing
    /// across restarts of the process.
    pub fn from_clock() -> Self {
        Self::starting_at(Utc::now().timestamp_millis())
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> i64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}
