//! The navigation engine: current scene tracking and transition validation.

use inkwell_scenes::domain::scene::{Scene, SceneId};
use inkwell_scenes::domain::scene_set::SceneSet;
use serde::Serialize;

use super::errors::NavigationError;
use super::phase::TransitionPhase;

/// Mutable navigation state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigationState {
    /// Scene currently shown.
    pub current_scene_id: SceneId,
    /// Whether a visual transition is in flight.
    pub is_transitioning: bool,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            current_scene_id: SceneId::INITIAL,
            is_transitioning: false,
        }
    }
}

/// Owns the scene set and the navigation state of one session.
#[derive(Debug, Clone)]
pub struct NavigationEngine {
    scenes: SceneSet,
    state: NavigationState,
    phase: TransitionPhase,
}

impl NavigationEngine {
    /// Starts navigation on `scenes`.
    ///
    /// Starts on scene 1 when present, otherwise on the smallest id.
    ///
    /// # Errors
    ///
    /// Returns `NavigationError::NoScenes` if the set is empty.
    pub fn initialize(scenes: SceneSet) -> Result<Self, NavigationError> {
        let mut state = NavigationState::default();
        if !scenes.contains(state.current_scene_id) {
            state.current_scene_id = scenes.first().ok_or(NavigationError::NoScenes)?.id;
            tracing::warn!(
                start = %state.current_scene_id,
                "scene {} not found, starting with the first available scene",
                SceneId::INITIAL
            );
        }

        Ok(Self {
            scenes,
            state,
            phase: TransitionPhase::Idle,
        })
    }

    /// The loaded scene set.
    #[must_use]
    pub fn scenes(&self) -> &SceneSet {
        &self.scenes
    }

    /// A copy of the navigation state.
    #[must_use]
    pub fn state(&self) -> NavigationState {
        self.state
    }

    /// The current transition phase.
    #[must_use]
    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// Id of the scene currently shown.
    #[must_use]
    pub fn current_scene_id(&self) -> SceneId {
        self.state.current_scene_id
    }

    /// Resolves the scene currently shown.
    ///
    /// # Errors
    ///
    /// Returns `NavigationError::SceneNotFound` if the current id is not in
    /// the set, which means the choice graph is broken.
    pub fn resolve_current(&self) -> Result<&Scene, NavigationError> {
        self.scenes
            .get(self.state.current_scene_id)
            .ok_or(NavigationError::SceneNotFound(self.state.current_scene_id))
    }

    /// Validates a requested target without changing any state.
    ///
    /// # Errors
    ///
    /// Returns `NavigationError::InvalidTarget` for a missing id and
    /// `NavigationError::UnknownTarget` for an id outside the set.
    pub fn transition(&self, requested: Option<SceneId>) -> Result<SceneId, NavigationError> {
        let target = requested.ok_or(NavigationError::InvalidTarget)?;
        if !self.scenes.contains(target) {
            return Err(NavigationError::UnknownTarget(target));
        }
        Ok(target)
    }

    /// Validates a target and enters `FadingOut`.
    ///
    /// # Errors
    ///
    /// Returns `NavigationError::TransitionInProgress` while another
    /// transition is in flight, otherwise the errors of [`Self::transition`].
    /// State is unchanged on error.
    pub fn begin_transition(
        &mut self,
        requested: Option<SceneId>,
    ) -> Result<SceneId, NavigationError> {
        if let Some(pending) = self.phase.target() {
            return Err(NavigationError::TransitionInProgress { pending });
        }
        let target = self.transition(requested)?;
        self.phase = TransitionPhase::FadingOut { target };
        self.state.is_transitioning = true;
        Ok(target)
    }

    /// Moves the transition to its next phase and returns the phase entered.
    ///
    /// Entering `Swapping` applies the target as the current scene; entering
    /// `Idle` clears the transitioning flag. A no-op while idle.
    pub fn advance_phase(&mut self) -> TransitionPhase {
        self.phase = self.phase.next();
        match self.phase {
            TransitionPhase::Swapping { target } => self.state.current_scene_id = target,
            TransitionPhase::Idle => self.state.is_transitioning = false,
            TransitionPhase::FadingOut { .. } | TransitionPhase::FadingIn { .. } => {}
        }
        self.phase
    }
}
