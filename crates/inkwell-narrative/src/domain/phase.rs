//! Transition phase state machine.
//!
//! `Idle → FadingOut → Swapping → FadingIn → Idle`. The two timed phases are
//! `FadingOut` and `FadingIn`; the scene id changes on entering `Swapping`.

use inkwell_scenes::domain::scene::SceneId;
use serde::Serialize;

/// Where a scene transition currently stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum TransitionPhase {
    /// No transition in flight.
    #[default]
    Idle,
    /// The current scene is being hidden.
    FadingOut {
        /// Scene being moved to.
        target: SceneId,
    },
    /// The current scene id has just been replaced.
    Swapping {
        /// Scene being moved to.
        target: SceneId,
    },
    /// The new scene is being revealed.
    FadingIn {
        /// Scene being moved to.
        target: SceneId,
    },
}

impl TransitionPhase {
    /// The phase that follows this one.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Idle | Self::FadingIn { .. } => Self::Idle,
            Self::FadingOut { target } => Self::Swapping { target },
            Self::Swapping { target } => Self::FadingIn { target },
        }
    }

    /// Target of the transition in flight, if any.
    #[must_use]
    pub fn target(self) -> Option<SceneId> {
        match self {
            Self::Idle => None,
            Self::FadingOut { target } | Self::Swapping { target } | Self::FadingIn { target } => {
                Some(target)
            }
        }
    }
}
