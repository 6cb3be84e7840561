//! Query handlers for the Navigation context.
//!
//! Builds the read-only view a renderer polls: loading, faulted with a
//! message, or ready with the current scene.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use inkwell_core::clock::Clock;
use inkwell_scenes::domain::choice::Choice;
use inkwell_scenes::domain::scene::{Presentation, Scene, SceneId, SceneKind};
use serde::Serialize;

use super::errors::PlayerError;
use super::session::{PlayerSession, SessionStatus, lock_session};
use crate::domain::navigation::NavigationState;
use crate::domain::phase::TransitionPhase;

/// Read-only view of a scene for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneView {
    /// The scene identifier.
    pub id: SceneId,
    /// Question or ending.
    pub kind: SceneKind,
    /// The question text, if any.
    pub question: Option<String>,
    /// Choices in display order.
    pub choices: Vec<Choice>,
    /// Pass-through display directives.
    pub presentation: Presentation,
}

impl From<&Scene> for SceneView {
    fn from(scene: &Scene) -> Self {
        Self {
            id: scene.id,
            kind: scene.kind,
            question: scene.presentation.question().map(str::to_owned),
            choices: scene.choices.clone(),
            presentation: scene.presentation.clone(),
        }
    }
}

/// The renderer-facing state of the player session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlayerView {
    /// Scene data is being fetched.
    Loading,
    /// The session hit a fatal error; a reload is required.
    Faulted {
        /// Human-readable description.
        message: String,
        /// When the session faulted.
        occurred_at: DateTime<Utc>,
    },
    /// A scene is being shown.
    Ready {
        /// The current scene.
        scene: SceneView,
        /// Navigation state.
        navigation: NavigationState,
        /// Transition phase.
        phase: TransitionPhase,
        /// Number of scenes loaded.
        scene_count: usize,
        /// Content hash of the loaded scene table.
        version_hash: String,
        /// When the scene table finished loading.
        loaded_at: Option<DateTime<Utc>>,
    },
}

/// Returns the current player view.
///
/// A current scene that no longer resolves faults the session and is
/// reported as `Faulted`.
///
/// # Errors
///
/// Returns `PlayerError::Poisoned` if the session lock is poisoned.
pub fn get_player_view(
    session: &Mutex<PlayerSession>,
    clock: &dyn Clock,
) -> Result<PlayerView, PlayerError> {
    let mut session = lock_session(session)?;

    let resolved = match session.status() {
        SessionStatus::Loading => return Ok(PlayerView::Loading),
        SessionStatus::Faulted(fault) => {
            return Ok(PlayerView::Faulted {
                message: fault.message.clone(),
                occurred_at: fault.occurred_at,
            });
        }
        SessionStatus::Ready(engine) => {
            engine
                .resolve_current()
                .map(|scene| PlayerView::Ready {
                    scene: SceneView::from(scene),
                    navigation: engine.state(),
                    phase: engine.phase(),
                    scene_count: engine.scenes().len(),
                    version_hash: engine.scenes().version_hash().to_owned(),
                    loaded_at: session.loaded_at(),
                })
        }
    };

    match resolved {
        Ok(view) => Ok(view),
        Err(err) => {
            let message = err.to_string();
            session.fault(message.clone(), clock);
            Ok(PlayerView::Faulted {
                message,
                occurred_at: clock.now(),
            })
        }
    }
}
