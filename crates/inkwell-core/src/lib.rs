//! Inkwell Core — shared abstractions.
//!
//! This crate defines the seams every other crate depends on: time, the
//! transition scheduler, the raw scene row source, the presentation sink
//! and the player configuration. It contains no transport or rendering
//! code.

pub mod clock;
pub mod config;
pub mod error;
pub mod presentation;
pub mod scheduler;
pub mod source;
