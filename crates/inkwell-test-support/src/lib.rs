//! Shared test doubles and utilities for the Inkwell scene player.

mod clock;
mod presentation;
mod scheduler;
mod source;

pub use clock::FixedClock;
pub use presentation::RecordingPresentationSink;
pub use scheduler::ImmediateScheduler;
pub use source::{FailingSceneSource, StaticSceneSource, sample_rows};
