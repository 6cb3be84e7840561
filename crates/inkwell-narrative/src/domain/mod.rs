//! Navigation domain: engine state, transition phases and backdrops.

pub mod backdrop;
pub mod commands;
pub mod errors;
pub mod navigation;
pub mod phase;
