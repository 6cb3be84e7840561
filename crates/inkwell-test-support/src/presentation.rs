//! Test sink — records every backdrop handed to it.

use std::sync::Mutex;

use inkwell_core::presentation::{Backdrop, PresentationSink};

/// A presentation sink that keeps every applied backdrop in order.
#[derive(Debug, Default)]
pub struct RecordingPresentationSink {
    applied: Mutex<Vec<Backdrop>>,
}

impl RecordingPresentationSink {
    /// Creates an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all applied backdrops.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn applied(&self) -> Vec<Backdrop> {
        self.applied.lock().unwrap().clone()
    }
}

impl PresentationSink for RecordingPresentationSink {
    fn apply_backdrop(&self, backdrop: &Backdrop) {
        self.applied.lock().unwrap().push(backdrop.clone());
    }
}
