//! Player-level error type.

use inkwell_core::error::SourceError;
use inkwell_scenes::error::LoadError;
use thiserror::Error;

use crate::domain::errors::NavigationError;

/// Any failure surfaced by the player session.
#[derive(Debug, Error)]
pub enum PlayerError {
    /// The scene table could not be fetched.
    #[error("failed to fetch scene data: {0}")]
    Source(#[from] SourceError),

    /// The scene table was fetched but could not be loaded.
    #[error("failed to load scene data: {0}")]
    Load(#[from] LoadError),

    /// Navigation failed.
    #[error(transparent)]
    Navigation(#[from] NavigationError),

    /// The session is loading or faulted and cannot navigate.
    #[error("player session is {0}")]
    NotReady(&'static str),

    /// The session was reloaded while the operation was in flight.
    #[error("session was reloaded before the operation finished")]
    Superseded,

    /// The session mutex was poisoned by a panicking holder.
    #[error("player session lock poisoned: {0}")]
    Poisoned(String),
}
