//! Per-user favorites and recently accessed files.
//!
//! Both endpoints answer with an array of records. The file id sits in a
//! record field (`favUrl` for favorites, `recentFile` for recents) and is
//! either a string or a number.

use std::collections::HashSet;

use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use tracing::debug;

use drivehub_core::config::backend::BackendConfig;
use drivehub_core::result::AppResult;
use drivehub_core::traits::source::{FavoritesStore, RecentFileStore};

use crate::api::ApiClient;

/// Field of a favorite record holding the file id.
const FAVORITE_FIELD: &str = "favUrl";
/// Field of a recent-file record holding the file id.
const RECENT_FIELD: &str = "recentFile";

/// File ids from `records`, in order. Records whose `field` is missing
/// fall back to a bare `id`; anything else is skipped.
pub fn extract_file_ids(records: &Value, field: &str) -> Vec<String> {
    let Some(items) = records.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|record| {
            let value = record.get(field).or_else(|| record.get("id"))?;
            match value {
                Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            }
        })
        .collect()
}

/// Favorites of the session user.
#[derive(Debug, Clone)]
pub struct HttpFavoritesStore {
    api: ApiClient,
    url: Url,
}

impl HttpFavoritesStore {
    pub fn new(api: ApiClient, config: &BackendConfig) -> AppResult<Self> {
        let url = api.url(&config.favorites_path)?;
        Ok(Self { api, url })
    }
}

#[async_trait]
impl FavoritesStore for HttpFavoritesStore {
    async fn favorite_file_ids(&self) -> AppResult<HashSet<String>> {
        let records: Value = self.api.post_json::<(), _>(self.url.clone(), None).await?;
        let ids: HashSet<String> = extract_file_ids(&records, FAVORITE_FIELD).into_iter().collect();
        debug!(count = ids.len(), "Loaded favorites");
        Ok(ids)
    }
}

/// Recently accessed files of the session user.
#[derive(Debug, Clone)]
pub struct HttpRecentFileStore {
    api: ApiClient,
    url: Url,
}

impl HttpRecentFileStore {
    pub fn new(api: ApiClient, config: &BackendConfig) -> AppResult<Self> {
        let url = api.url(&config.recent_path)?;
        Ok(Self { api, url })
    }
}

#[async_trait]
impl RecentFileStore for HttpRecentFileStore {
    async fn recent_file_ids(&self) -> AppResult<Vec<String>> {
        let records: Value = self.api.post_json::<(), _>(self.url.clone(), None).await?;
        Ok(extract_file_ids(&records, RECENT_FIELD))
    }
}
