//! Command handlers for the Navigation context.
//!
//! Each handler locks the session only around synchronous domain calls and
//! never holds the guard across an await point.

use std::sync::Mutex;

use inkwell_core::clock::Clock;
use inkwell_core::config::TransitionTimings;
use inkwell_core::presentation::PresentationSink;
use inkwell_core::scheduler::Scheduler;
use inkwell_core::source::SceneSource;
use inkwell_scenes::domain::scene::SceneId;
use tracing::{debug, info};

use super::errors::PlayerError;
use super::session::{PendingTransition, PlayerSession, lock_session};
use crate::domain::commands::{ChooseScene, ReloadScenes};
use crate::domain::errors::NavigationError;

/// Puts the session into `Loading` for a new load and returns its
/// generation.
///
/// # Errors
///
/// Returns `PlayerError::Poisoned` if the session lock is poisoned.
pub fn begin_load(
    command: &ReloadScenes,
    session: &Mutex<PlayerSession>,
) -> Result<u64, PlayerError> {
    let generation = lock_session(session)?.start_loading();
    info!(
        correlation_id = %command.correlation_id,
        generation,
        "loading scene data"
    );
    Ok(generation)
}

/// Fetches the scene rows and completes the load started by `begin_load`.
///
/// # Errors
///
/// Returns the fetch or load error that faulted the session, or
/// `PlayerError::Superseded` if a newer load started meanwhile.
pub async fn complete_load(
    generation: u64,
    session: &Mutex<PlayerSession>,
    source: &dyn SceneSource,
    clock: &dyn Clock,
    sink: &dyn PresentationSink,
) -> Result<SceneId, PlayerError> {
    let rows = source.fetch_rows().await;
    lock_session(session)?.finish_loading(generation, rows, clock, sink)
}

/// Handles the `ReloadScenes` command: enters `Loading`, fetches the rows
/// and starts navigation on the new scene set.
///
/// # Errors
///
/// See [`complete_load`].
pub async fn handle_load(
    command: &ReloadScenes,
    session: &Mutex<PlayerSession>,
    source: &dyn SceneSource,
    clock: &dyn Clock,
    sink: &dyn PresentationSink,
) -> Result<SceneId, PlayerError> {
    let generation = begin_load(command, session)?;
    complete_load(generation, session, source, clock, sink).await
}

/// Validates the chosen target and starts the transition.
///
/// A request arriving while another transition is in flight is ignored and
/// reported as `NavigationError::TransitionInProgress`.
///
/// # Errors
///
/// Returns `PlayerError::NotReady` unless the session is ready, or the
/// navigation error. Errors other than an in-flight transition fault the
/// session.
pub fn begin_choice(
    command: &ChooseScene,
    session: &Mutex<PlayerSession>,
    clock: &dyn Clock,
) -> Result<PendingTransition, PlayerError> {
    let result = lock_session(session)?.begin_transition(command.next_scene_id, clock);
    match &result {
        Ok(pending) => info!(
            correlation_id = %command.correlation_id,
            next_scene = %pending.target,
            "choice accepted, transitioning"
        ),
        Err(PlayerError::Navigation(NavigationError::TransitionInProgress { pending })) => debug!(
            correlation_id = %command.correlation_id,
            pending = %pending,
            "choice ignored while transitioning"
        ),
        Err(_) => {}
    }
    result
}

/// Sequences an accepted transition: fade out, swap, fade in.
///
/// # Errors
///
/// Returns `PlayerError::Superseded` if the session was reloaded meanwhile,
/// or the error that faulted it.
pub async fn run_transition(
    pending: PendingTransition,
    session: &Mutex<PlayerSession>,
    scheduler: &dyn Scheduler,
    timings: TransitionTimings,
    clock: &dyn Clock,
    sink: &dyn PresentationSink,
) -> Result<SceneId, PlayerError> {
    scheduler.sleep(timings.fade_out).await;
    {
        let mut guard = lock_session(session)?;
        guard.advance_transition(&pending, clock, sink)?;
        guard.advance_transition(&pending, clock, sink)?;
    }

    scheduler.sleep(timings.fade_in).await;
    lock_session(session)?.advance_transition(&pending, clock, sink)?;

    debug!(next_scene = %pending.target, "transition complete");
    Ok(pending.target)
}

/// Handles the `ChooseScene` command end to end.
///
/// # Errors
///
/// See [`begin_choice`] and [`run_transition`].
pub async fn handle_choose(
    command: &ChooseScene,
    session: &Mutex<PlayerSession>,
    scheduler: &dyn Scheduler,
    timings: TransitionTimings,
    clock: &dyn Clock,
    sink: &dyn PresentationSink,
) -> Result<SceneId, PlayerError> {
    let pending = begin_choice(command, session, clock)?;
    run_transition(pending, session, scheduler, timings, clock, sink).await
}
