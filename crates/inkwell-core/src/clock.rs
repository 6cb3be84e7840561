//! Time source for the player session.
//!
//! The session stamps when a scene table finished loading and when it
//! faulted; tests pin both with a fixed clock.

use chrono::{DateTime, Utc};

/// Wall-clock time as seen by the player session.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
