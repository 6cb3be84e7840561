//! Commands for the Navigation context.

use inkwell_scenes::domain::scene::SceneId;
use uuid::Uuid;

/// Command to move to the scene a choice points at.
#[derive(Debug, Clone)]
pub struct ChooseScene {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Target of the selected choice. `None` when the renderer sent no id.
    pub next_scene_id: Option<SceneId>,
}

/// Command to discard the session and fetch the scene table again.
#[derive(Debug, Clone)]
pub struct ReloadScenes {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}
