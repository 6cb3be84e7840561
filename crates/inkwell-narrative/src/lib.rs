//! Inkwell — Navigation Engine.
//!
//! Responsible for picking the starting scene, resolving the current scene,
//! validating and sequencing transitions, and the loading/ready/faulted
//! lifecycle of the single player session.

pub mod application;
pub mod domain;
