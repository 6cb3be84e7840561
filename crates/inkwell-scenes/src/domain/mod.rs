//! Scene graph domain types.

pub mod choice;
pub mod scene;
pub mod scene_set;
