//! Test scheduler — returns immediately and records every requested delay.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use inkwell_core::scheduler::Scheduler;

/// A scheduler that never waits. Requested delays are recorded so tests can
/// assert on the transition timing sequence.
#[derive(Debug, Default)]
pub struct ImmediateScheduler {
    requested: Mutex<Vec<Duration>>,
}

impl ImmediateScheduler {
    /// Creates a scheduler with an empty delay log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all requested delays, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn requested_delays(&self) -> Vec<Duration> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl Scheduler for ImmediateScheduler {
    async fn sleep(&self, duration: Duration) {
        self.requested.lock().unwrap().push(duration);
    }
}
