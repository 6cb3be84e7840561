//! Test sources — mock `SceneSource` implementations for tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use inkwell_core::error::SourceError;
use inkwell_core::source::SceneSource;
use serde_json::{Value, json};

/// A source that serves a configurable set of rows and counts fetches.
#[derive(Debug)]
pub struct StaticSceneSource {
    rows: Mutex<Vec<Value>>,
    fetches: AtomicUsize,
}

impl StaticSceneSource {
    /// Creates a source that serves `rows` on every fetch.
    #[must_use]
    pub fn new(rows: Vec<Value>) -> Self {
        Self {
            rows: Mutex::new(rows),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Replaces the rows served by subsequent fetches.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn set_rows(&self, rows: Vec<Value>) {
        *self.rows.lock().unwrap() = rows;
    }

    /// Number of completed `fetch_rows` calls.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SceneSource for StaticSceneSource {
    async fn fetch_rows(&self) -> Result<Vec<Value>, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.rows.lock().unwrap().clone())
    }
}

/// A source that always fails with a transport error. Useful for testing the
/// faulted path.
#[derive(Debug)]
pub struct FailingSceneSource;

#[async_trait]
impl SceneSource for FailingSceneSource {
    async fn fetch_rows(&self) -> Result<Vec<Value>, SourceError> {
        Err(SourceError::Transport("connection refused".into()))
    }
}

/// A small story used across tests.
///
/// Scene 1 branches to 2 and 3, scene 2 leads to the ending 4, scene 3 has a
/// broken link to 99 and the ending restarts at 1. Scenes 1 and 2 share the
/// same music; the ending has none.
#[must_use]
pub fn sample_rows() -> Vec<Value> {
    vec![
        json!({
            "sceneId": "1",
            "question": "You wake up in a forest. Where do you go?",
            "choices": "[{\"text\": \"Follow the river\", \"nextSceneId\": 2}, {\"text\": \"Climb the hill\", \"nextSceneId\": \"3\"}]",
            "backgroundImage": "forest.jpg",
            "backgroundMusic": "theme.mp3"
        }),
        json!({
            "sceneId": 2,
            "question": "The river ends at a village.",
            "choices": [{ "text": "Rest", "nextSceneId": 4 }],
            "backgroundImage": "/village.jpg",
            "backgroundMusic": "theme.mp3"
        }),
        json!({
            "sceneId": 3,
            "question": "The hill is shrouded in fog.",
            "choices": [{ "text": "Step into the fog", "nextSceneId": 99 }]
        }),
        json!({
            "sceneId": 4,
            "sceneType": "ending",
            "question": "You found a home. The end.",
            "choices": [{ "text": "Play again", "nextSceneId": 1 }]
        }),
    ]
}
