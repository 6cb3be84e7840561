//! Player configuration passed in at construction.

use std::time::Duration;

/// Default delay between hiding the current scene and swapping in the next.
pub const DEFAULT_FADE_OUT: Duration = Duration::from_millis(300);

/// Default delay between swapping scenes and marking the transition done.
pub const DEFAULT_FADE_IN: Duration = Duration::from_millis(50);

/// Delays of the two timed transition phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTimings {
    /// Time spent fading the current scene out.
    pub fade_out: Duration,
    /// Time spent fading the new scene in.
    pub fade_in: Duration,
}

impl Default for TransitionTimings {
    fn default() -> Self {
        Self {
            fade_out: DEFAULT_FADE_OUT,
            fade_in: DEFAULT_FADE_IN,
        }
    }
}

/// Configuration for one player session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerConfig {
    /// Endpoint of the spreadsheet-backed scene table.
    pub source_url: String,
    /// Transition phase delays.
    pub transition: TransitionTimings,
}

impl PlayerConfig {
    /// Creates a configuration with default transition timings.
    #[must_use]
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            transition: TransitionTimings::default(),
        }
    }

    /// Replaces the transition timings.
    #[must_use]
    pub fn with_transition(mut self, transition: TransitionTimings) -> Self {
        self.transition = transition;
        self
    }
}
