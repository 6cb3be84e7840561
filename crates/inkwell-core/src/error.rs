//! Data source error types.

use thiserror::Error;

/// Failure to obtain raw scene rows from the data source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The configured endpoint is not an absolute http(s) URL.
    #[error("invalid data source endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint {
        /// The endpoint as configured.
        endpoint: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The request could not be sent or the body could not be read.
    #[error("data source request failed: {0}")]
    Transport(String),

    /// The data source answered with a non-success status.
    #[error("data source returned HTTP {status}{}", status_hint(.status))]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, kept for diagnostics.
        body: String,
    },

    /// The response body was not a JSON array of rows.
    #[error("malformed data source response: {0}")]
    Malformed(String),
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn status_hint(status: &u16) -> &'static str {
    if *status == 400 {
        " (bad request: check the sheet headers, data format and URL)"
    } else {
        ""
    }
}
