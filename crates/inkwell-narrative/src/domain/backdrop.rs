//! Backdrop directives derived from a scene's presentation fields.

use inkwell_core::presentation::{Backdrop, MusicCue};
use inkwell_scenes::domain::scene::Scene;

/// Tracks the music source in effect so each scene entry yields a cue
/// relative to what is already playing.
#[derive(Debug, Clone, Default)]
pub struct BackdropTracker {
    playing: Option<String>,
}

impl BackdropTracker {
    /// Creates a tracker with nothing playing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The music source currently in effect.
    #[must_use]
    pub fn playing(&self) -> Option<&str> {
        self.playing.as_deref()
    }

    /// Computes the backdrop for entering `scene` and records its music.
    pub fn enter(&mut self, scene: &Scene) -> Backdrop {
        let background = scene.presentation.background_image().map(rooted_path);
        let wanted = scene.presentation.background_music().map(music_source);

        let music = match (wanted, self.playing.take()) {
            (Some(src), Some(current)) if src == current => {
                self.playing = Some(current);
                MusicCue::Keep
            }
            (Some(src), _) => {
                self.playing = Some(src.clone());
                MusicCue::Play(src)
            }
            (None, Some(_)) => MusicCue::Stop,
            (None, None) => MusicCue::Silent,
        };

        Backdrop { background, music }
    }
}

fn rooted_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{path}")
    }
}

fn music_source(src: &str) -> String {
    if src.starts_with("http") {
        src.to_owned()
    } else {
        rooted_path(src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkwell_scenes::domain::scene::{Presentation, SceneId, SceneKind};
    use serde_json::{Map, Value, json};

    fn scene_with(fields: Value) -> Scene {
        let fields: Map<String, Value> = fields.as_object().cloned().unwrap();
        Scene::new(SceneId(1), SceneKind::Question, Vec::new())
            .with_presentation(Presentation::new(fields))
    }

    #[test]
    fn test_relative_paths_are_rooted() {
        // Arrange
        let mut tracker = BackdropTracker::new();
        let scene = scene_with(json!({
            "backgroundImage": "forest.jpg",
            "backgroundMusic": "audio/theme.mp3"
        }));

        // Act
        let backdrop = tracker.enter(&scene);

        // Assert
        assert_eq!(backdrop.background.as_deref(), Some("/forest.jpg"));
        assert_eq!(backdrop.music, MusicCue::Play("/audio/theme.mp3".to_owned()));
        assert_eq!(tracker.playing(), Some("/audio/theme.mp3"));
    }

    #[test]
    fn test_absolute_and_remote_sources_are_kept() {
        let mut tracker = BackdropTracker::new();
        let scene = scene_with(json!({
            "backgroundImage": "/img/bg.png",
            "backgroundMusic": "https://cdn.example.test/theme.ogg"
        }));

        let backdrop = tracker.enter(&scene);

        assert_eq!(backdrop.background.as_deref(), Some("/img/bg.png"));
        assert_eq!(
            backdrop.music,
            MusicCue::Play("https://cdn.example.test/theme.ogg".to_owned())
        );
    }

    #[test]
    fn test_same_music_is_kept_and_missing_music_stops() {
        // Arrange
        let mut tracker = BackdropTracker::new();
        let first = scene_with(json!({ "backgroundMusic": "theme.mp3" }));
        let second = scene_with(json!({ "backgroundMusic": "/theme.mp3" }));
        let silent = scene_with(json!({}));

        // Act
        let cues: Vec<MusicCue> = [&first, &second, &silent, &silent]
            .into_iter()
            .map(|scene| tracker.enter(scene).music)
            .collect();

        // Assert
        assert_eq!(
            cues,
            vec![
                MusicCue::Play("/theme.mp3".to_owned()),
                MusicCue::Keep,
                MusicCue::Stop,
                MusicCue::Silent,
            ]
        );
        assert_eq!(tracker.playing(), None);
    }

    #[test]
    fn test_missing_background_clears_it() {
        let mut tracker = BackdropTracker::new();

        let backdrop = tracker.enter(&scene_with(json!({ "question": "Hi" })));

        assert_eq!(backdrop.background, None);
    }
}
