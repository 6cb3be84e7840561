//! Player session lifecycle, command handlers and views.

pub mod command_handlers;
pub mod errors;
pub mod query_handlers;
pub mod session;
