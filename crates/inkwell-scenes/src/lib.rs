//! Inkwell — Scene Repository.
//!
//! Turns the untyped rows of a scene table into a validated, id-indexed
//! [`SceneSet`](domain::scene_set::SceneSet). Row-local problems are reported
//! as warnings and skipped; only table-wide problems fail the load.

pub mod application;
pub mod domain;
pub mod error;
