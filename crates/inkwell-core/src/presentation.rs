//! Presentation sink abstraction.
//!
//! The engine never touches a document or an audio device. It hands the
//! background and music directives of each scene it enters to a sink.

/// What to do with the background music when a scene is entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MusicCue {
    /// Load and play this source.
    Play(String),
    /// The current source is already playing; leave it alone.
    Keep,
    /// Stop playback and clear the source.
    Stop,
    /// Nothing was playing and nothing should play.
    Silent,
}

/// Background directives for the scene being entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backdrop {
    /// Absolute image path, or `None` to clear the background.
    pub background: Option<String>,
    /// Music directive relative to what was playing before.
    pub music: MusicCue,
}

/// Receives backdrop directives whenever the current scene changes.
pub trait PresentationSink: Send + Sync {
    /// Applies the backdrop of the scene just entered.
    fn apply_backdrop(&self, backdrop: &Backdrop);
}
