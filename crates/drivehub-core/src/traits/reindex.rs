//! Consumer of the folder selection.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// Result of a reindex request as reported by the search backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReindexReport {
    /// Backend status, e.g. `"reindexed"` or `"skipped"`.
    pub status: String,
    /// Folder ids the backend actually indexed.
    pub folders: Vec<String>,
    /// Why nothing was indexed, when skipped.
    pub reason: Option<String>,
}

/// Rebuilds search indices scoped to a set of folders.
#[async_trait]
pub trait ReindexSink: Send + Sync + std::fmt::Debug + 'static {
    /// Request a reindex of `folder_ids`.
    async fn reindex(&self, folder_ids: &[String]) -> AppResult<ReindexReport>;
}
