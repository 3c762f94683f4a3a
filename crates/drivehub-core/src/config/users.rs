//! User directory and recency configuration.

use serde::{Deserialize, Serialize};

/// User id to display name resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UserDirectoryConfig {
    /// Maximum number of cached display names.
    pub cache_capacity: u64,
    /// Time-to-live of a cached display name in seconds.
    pub cache_ttl_seconds: u64,
    /// Shown when a name cannot be resolved.
    pub placeholder: String,
}

impl Default for UserDirectoryConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 1000,
            cache_ttl_seconds: 600,
            placeholder: "-".to_string(),
        }
    }
}

/// Bounded recency views.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecentConfig {
    /// Recently accessed files kept per user.
    pub file_capacity: usize,
    /// Recent search queries kept.
    pub query_capacity: usize,
}

impl Default for RecentConfig {
    fn default() -> Self {
        Self {
            file_capacity: 10,
            query_capacity: 10,
        }
    }
}
