//! Backend endpoint configuration.

use serde::{Deserialize, Serialize};

/// REST backend that serves the drive hierarchy and per-user lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL, e.g. `http://localhost:8090`.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
    /// Path of the "list hierarchy for connected accounts" endpoint.
    pub drive_loading_path: String,
    /// Path of the favorites listing endpoint.
    pub favorites_path: String,
    /// Path of the recently accessed files endpoint.
    pub recent_path: String,
    /// Path of the user id to display name endpoint.
    pub user_lookup_path: String,
    /// Session cookie forwarded as-is on every request.
    pub session_cookie: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8090".to_string(),
            timeout_seconds: 30,
            drive_loading_path: "/api/dooray/driveLoading".to_string(),
            favorites_path: "/fav/list".to_string(),
            recent_path: "/recentFile/show".to_string(),
            user_lookup_path: "/api/dooray/userId".to_string(),
            session_cookie: None,
        }
    }
}

/// RAG search service that rebuilds indices for selected folders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RagConfig {
    /// Base URL, e.g. `http://127.0.0.1:8000`.
    pub base_url: String,
    /// Path of the reindex endpoint.
    pub reindex_path: String,
    /// Request timeout in seconds. Reindexing is slow.
    pub timeout_seconds: u64,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            reindex_path: "/reindex".to_string(),
            timeout_seconds: 300,
        }
    }
}
