//! Navigation error types.

use inkwell_scenes::domain::scene::SceneId;
use thiserror::Error;

/// Failure to resolve a scene or to move between scenes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// The scene set holds nothing to start from.
    #[error("no scenes available to start from")]
    NoScenes,

    /// The current scene id does not resolve; the choice graph is broken.
    #[error("scene {0} not found")]
    SceneNotFound(SceneId),

    /// A choice was selected without a target scene.
    #[error("choice has no target scene")]
    InvalidTarget,

    /// A choice points at a scene that does not exist.
    #[error("next scene {0} does not exist; check the scene table")]
    UnknownTarget(SceneId),

    /// Another transition has not finished yet.
    #[error("a transition to scene {pending} is already in progress")]
    TransitionInProgress {
        /// Target of the transition in flight.
        pending: SceneId,
    },
}
