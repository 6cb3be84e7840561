//! HTTP implementation of the `SceneSource` trait.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, warn};

use inkwell_core::error::SourceError;
use inkwell_core::source::SceneSource;

/// Scene source backed by a sheet-to-JSON API endpoint.
///
/// A `GET` on the endpoint must answer with a JSON array holding one object
/// per spreadsheet row.
#[derive(Debug, Clone)]
pub struct SheetSource {
    client: Client,
    endpoint: Url,
}

impl SheetSource {
    /// Creates a source for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::InvalidEndpoint` unless `endpoint` is an
    /// absolute `http` or `https` URL.
    pub fn new(endpoint: &str) -> Result<Self, SourceError> {
        Ok(Self {
            client: Client::new(),
            endpoint: parse_endpoint(endpoint)?,
        })
    }

    /// The endpoint rows are fetched from.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SceneSource for SheetSource {
    async fn fetch_rows(&self) -> Result<Vec<Value>, SourceError> {
        debug!(endpoint = %self.endpoint, "fetching scene rows");

        let response = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&body).into_owned();
            warn!(status = status.as_u16(), %body, "data source returned an error");
            return Err(SourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let rows = parse_rows_body(&body)?;
        debug!(rows = rows.len(), "scene rows fetched");
        Ok(rows)
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, SourceError> {
    let invalid = |reason: String| SourceError::InvalidEndpoint {
        endpoint: endpoint.to_owned(),
        reason,
    };

    let url = Url::parse(endpoint.trim()).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme `{other}`"))),
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing host".to_owned()));
    }
    Ok(url)
}

/// Parses a response body into scene rows.
///
/// # Errors
///
/// Returns `SourceError::Malformed` if the body is not JSON or not an array.
pub fn parse_rows_body(body: &[u8]) -> Result<Vec<Value>, SourceError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Array(rows)) => Ok(rows),
        Ok(other) => Err(SourceError::Malformed(format!(
            "expected an array of rows, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(SourceError::Malformed(e.to_string())),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
