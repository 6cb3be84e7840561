//! Inkwell — spreadsheet-backed scene source.
//!
//! Fetches the scene table as a JSON array of rows from a sheet-to-JSON
//! HTTP API.

pub mod sheet_source;
