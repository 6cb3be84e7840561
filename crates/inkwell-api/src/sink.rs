//! Presentation sink for a headless server.

use inkwell_core::presentation::{Backdrop, MusicCue, PresentationSink};
use tracing::info;

/// Reports every backdrop change as a structured log event. The renderer
/// reads the same directives from the player view.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingPresentationSink;

impl PresentationSink for TracingPresentationSink {
    fn apply_backdrop(&self, backdrop: &Backdrop) {
        let (music, source) = match &backdrop.music {
            MusicCue::Play(src) => ("play", Some(src.as_str())),
            MusicCue::Keep => ("keep", None),
            MusicCue::Stop => ("stop", None),
            MusicCue::Silent => ("silent", None),
        };
        info!(
            background = backdrop.background.as_deref().unwrap_or("none"),
            music,
            source = source.unwrap_or(""),
            "backdrop applied"
        );
    }
}
