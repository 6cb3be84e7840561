//! The single player session: `Loading → Ready → Faulted`.
//!
//! Every method here is synchronous and meant to run under the session
//! mutex. The async handlers in `command_handlers` lock only around these
//! calls.

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use inkwell_core::clock::Clock;
use inkwell_core::error::SourceError;
use inkwell_core::presentation::PresentationSink;
use inkwell_scenes::application::loader;
use inkwell_scenes::domain::scene::SceneId;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use super::errors::PlayerError;
use crate::domain::backdrop::BackdropTracker;
use crate::domain::errors::NavigationError;
use crate::domain::navigation::NavigationEngine;
use crate::domain::phase::TransitionPhase;

/// A user-visible fatal error. Only a reload leaves this state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fault {
    /// Human-readable description.
    pub message: String,
    /// When the session faulted.
    pub occurred_at: DateTime<Utc>,
}

/// Top-level session state. Exactly one holds at any time.
#[derive(Debug, Clone, Default)]
pub enum SessionStatus {
    /// Scene data is being fetched.
    #[default]
    Loading,
    /// Scenes are loaded and navigation is possible.
    Ready(NavigationEngine),
    /// Something fatal happened.
    Faulted(Fault),
}

/// A transition accepted by the engine and waiting to be sequenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTransition {
    /// Session generation the transition belongs to.
    pub generation: u64,
    /// Scene being moved to.
    pub target: SceneId,
}

/// The state of the one player session served by this process.
#[derive(Debug, Default)]
pub struct PlayerSession {
    status: SessionStatus,
    generation: u64,
    loaded_at: Option<DateTime<Utc>>,
    backdrop: BackdropTracker,
}

/// Locks the session, mapping a poisoned mutex to `PlayerError::Poisoned`.
///
/// # Errors
///
/// Returns `PlayerError::Poisoned` if a previous holder panicked.
pub fn lock_session(
    session: &Mutex<PlayerSession>,
) -> Result<MutexGuard<'_, PlayerSession>, PlayerError> {
    session
        .lock()
        .map_err(|e| PlayerError::Poisoned(e.to_string()))
}

impl PlayerSession {
    /// Creates a session in the `Loading` state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current top-level status.
    #[must_use]
    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    /// Number of loads started so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// When the current scene set finished loading.
    #[must_use]
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    /// The navigation engine, when ready.
    #[must_use]
    pub fn engine(&self) -> Option<&NavigationEngine> {
        match &self.status {
            SessionStatus::Ready(engine) => Some(engine),
            SessionStatus::Loading | SessionStatus::Faulted(_) => None,
        }
    }

    /// Enters `Loading` and starts a new generation. Any load or transition
    /// belonging to an older generation is discarded when it completes.
    pub fn start_loading(&mut self) -> u64 {
        self.generation += 1;
        self.status = SessionStatus::Loading;
        self.loaded_at = None;
        self.generation
    }

    /// Completes the load started by `start_loading`.
    ///
    /// On success the session becomes `Ready` on the starting scene and its
    /// backdrop is handed to `sink`. On failure the session faults.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::Superseded` if another load started meanwhile,
    /// otherwise the fetch, load or navigation error that faulted the
    /// session.
    pub fn finish_loading(
        &mut self,
        generation: u64,
        rows: Result<Vec<Value>, SourceError>,
        clock: &dyn Clock,
        sink: &dyn PresentationSink,
    ) -> Result<SceneId, PlayerError> {
        if generation != self.generation {
            return Err(PlayerError::Superseded);
        }

        let started = rows
            .map_err(PlayerError::from)
            .and_then(|rows| loader::load(&rows).map_err(PlayerError::from))
            .and_then(|scenes| NavigationEngine::initialize(scenes).map_err(PlayerError::from))
            .and_then(|engine| {
                let backdrop = self.backdrop.enter(engine.resolve_current()?);
                Ok((engine, backdrop))
            });

        match started {
            Ok((engine, backdrop)) => {
                let start = engine.current_scene_id();
                info!(
                    scenes = engine.scenes().len(),
                    start = %start,
                    "scene data loaded"
                );
                sink.apply_backdrop(&backdrop);
                self.status = SessionStatus::Ready(engine);
                self.loaded_at = Some(clock.now());
                Ok(start)
            }
            Err(err) => {
                self.fault(err.to_string(), clock);
                Err(err)
            }
        }
    }

    /// Validates a choice target and enters `FadingOut`.
    ///
    /// A request made while a transition is in flight is rejected without
    /// touching the session. Any other navigation error faults it.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::NotReady` unless ready, otherwise the
    /// navigation error.
    pub fn begin_transition(
        &mut self,
        requested: Option<SceneId>,
        clock: &dyn Clock,
    ) -> Result<PendingTransition, PlayerError> {
        let outcome = match &mut self.status {
            SessionStatus::Ready(engine) => engine.begin_transition(requested),
            SessionStatus::Loading => return Err(PlayerError::NotReady("loading")),
            SessionStatus::Faulted(_) => return Err(PlayerError::NotReady("faulted")),
        };

        match outcome {
            Ok(target) => Ok(PendingTransition {
                generation: self.generation,
                target,
            }),
            Err(err @ NavigationError::TransitionInProgress { .. }) => Err(err.into()),
            Err(err) => {
                self.fault(err.to_string(), clock);
                Err(err.into())
            }
        }
    }

    /// Moves `pending` to its next phase and returns the phase entered.
    ///
    /// On entering `Swapping` the new scene is resolved and its backdrop is
    /// handed to `sink`; a scene that fails to resolve faults the session.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::Superseded` if the session was reloaded since
    /// `pending` was accepted, `PlayerError::NotReady` if it faulted, or the
    /// resolution error.
    pub fn advance_transition(
        &mut self,
        pending: &PendingTransition,
        clock: &dyn Clock,
        sink: &dyn PresentationSink,
    ) -> Result<TransitionPhase, PlayerError> {
        if pending.generation != self.generation {
            return Err(PlayerError::Superseded);
        }
        let SessionStatus::Ready(engine) = &mut self.status else {
            return Err(PlayerError::NotReady("faulted"));
        };

        let phase = engine.advance_phase();
        if !matches!(phase, TransitionPhase::Swapping { .. }) {
            return Ok(phase);
        }

        let backdrop = engine
            .resolve_current()
            .map(|scene| self.backdrop.enter(scene));
        match backdrop {
            Ok(backdrop) => {
                sink.apply_backdrop(&backdrop);
                Ok(phase)
            }
            Err(err) => {
                self.fault(err.to_string(), clock);
                Err(err.into())
            }
        }
    }

    /// Enters `Faulted` with `message`.
    pub fn fault(&mut self, message: impl Into<String>, clock: &dyn Clock) {
        let message = message.into();
        error!(%message, "player session faulted");
        self.status = SessionStatus::Faulted(Fault {
            message,
            occurred_at: clock.now(),
        });
    }
}
