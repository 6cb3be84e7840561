//! Raw scene row source abstraction.

use async_trait::async_trait;

use crate::error::SourceError;

/// Delivers the untyped scene rows a session is built from.
///
/// Rows are returned exactly as the upstream table produced them; shape
/// checking belongs to the scene repository.
#[async_trait]
pub trait SceneSource: Send + Sync {
    /// Fetches every row of the scene table.
    async fn fetch_rows(&self) -> Result<Vec<serde_json::Value>, SourceError>;
}
