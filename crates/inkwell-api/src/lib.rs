//! Inkwell scene player — HTTP server library.
//!
//! Exposes the player session over a small JSON API. The binary in
//! `main.rs` wires configuration, telemetry and the production adapters.

pub mod config;
pub mod error;
pub mod routes;
pub mod sink;
pub mod state;
pub mod telemetry;
