//! Loading raw rows into a scene set.

pub mod loader;
