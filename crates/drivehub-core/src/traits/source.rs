//! Sources of drive hierarchy and per-user file lists.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::result::AppResult;

/// Lists the folder/file hierarchy of every connected account.
#[async_trait]
pub trait DriveSource: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch the raw, provider-specific payload.
    ///
    /// The payload is decoded leniently by the transform step, so the
    /// source does not validate its shape.
    async fn load_hierarchy(&self) -> AppResult<serde_json::Value>;
}

/// Lists the files the current user marked as favorite.
#[async_trait]
pub trait FavoritesStore: Send + Sync + std::fmt::Debug + 'static {
    /// Provider-native ids of favorited files.
    async fn favorite_file_ids(&self) -> AppResult<HashSet<String>>;
}

/// Lists the files the current user accessed recently.
#[async_trait]
pub trait RecentFileStore: Send + Sync + std::fmt::Debug + 'static {
    /// Provider-native file ids, most recent first.
    async fn recent_file_ids(&self) -> AppResult<Vec<String>>;
}
