//! Shared application state.

use std::sync::{Arc, Mutex};

use inkwell_core::clock::Clock;
use inkwell_core::config::TransitionTimings;
use inkwell_core::presentation::PresentationSink;
use inkwell_core::scheduler::Scheduler;
use inkwell_core::source::SceneSource;
use inkwell_narrative::application::session::PlayerSession;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The single player session served by this process.
    pub session: Arc<Mutex<PlayerSession>>,
    /// Clock for fault timestamps and load times.
    pub clock: Arc<dyn Clock>,
    /// Delay primitive for the transition phases.
    pub scheduler: Arc<dyn Scheduler>,
    /// Where scene rows come from.
    pub source: Arc<dyn SceneSource>,
    /// Receives backdrop changes.
    pub sink: Arc<dyn PresentationSink>,
    /// Transition phase delays.
    pub timings: TransitionTimings,
}

impl AppState {
    /// Create new application state with a fresh session in `Loading`.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        scheduler: Arc<dyn Scheduler>,
        source: Arc<dyn SceneSource>,
        sink: Arc<dyn PresentationSink>,
        timings: TransitionTimings,
    ) -> Self {
        Self {
            session: Arc::new(Mutex::new(PlayerSession::new())),
            clock,
            scheduler,
            source,
            sink,
            timings,
        }
    }
}
