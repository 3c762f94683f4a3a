//! Drive hierarchy endpoint.

use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;

use drivehub_core::config::backend::BackendConfig;
use drivehub_core::result::AppResult;
use drivehub_core::traits::source::DriveSource;

use crate::api::ApiClient;

/// Loads the hierarchy of every connected account from the backend.
#[derive(Debug, Clone)]
pub struct HttpDriveSource {
    api: ApiClient,
    url: Url,
}

impl HttpDriveSource {
    pub fn new(api: ApiClient, config: &BackendConfig) -> AppResult<Self> {
        let url = api.url(&config.drive_loading_path)?;
        Ok(Self { api, url })
    }
}

#[async_trait]
impl DriveSource for HttpDriveSource {
    async fn load_hierarchy(&self) -> AppResult<Value> {
        self.api.post_json::<(), Value>(self.url.clone(), None).await
    }
}
