//! Scheduler abstraction for the timed scene transition.
//!
//! The transition phases wait on this primitive instead of nesting timers,
//! so tests can drive a transition to completion without real delays.

use std::time::Duration;

use async_trait::async_trait;

/// Single delay primitive used to sequence transition phases.
#[async_trait]
pub trait Scheduler: Send + Sync {
    /// Suspends the caller for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Production scheduler backed by the tokio timer.
#[derive(Debug, Clone, Copy)]
pub struct TokioScheduler;

#[async_trait]
impl Scheduler for TokioScheduler {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
