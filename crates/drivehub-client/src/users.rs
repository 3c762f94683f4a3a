//! User id to display name lookup.

use async_trait::async_trait;
use reqwest::Url;

use drivehub_core::config::backend::BackendConfig;
use drivehub_core::error::{AppError, ErrorKind};
use drivehub_core::result::AppResult;
use drivehub_core::traits::directory::UserDirectory;

use crate::api::ApiClient;

/// Resolves member ids through the backend, which answers in plain text.
#[derive(Debug, Clone)]
pub struct HttpUserDirectory {
    api: ApiClient,
    endpoint: Url,
}

impl HttpUserDirectory {
    pub fn new(api: ApiClient, config: &BackendConfig) -> AppResult<Self> {
        let endpoint = api.url(&config.user_lookup_path)?;
        Ok(Self { api, endpoint })
    }

    fn lookup_url(&self, user_id: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("userId", user_id);
        url
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn display_name(&self, user_id: &str) -> AppResult<String> {
        let response = self.api.post::<()>(self.lookup_url(user_id), None).await?;
        let name = response.text().await.map_err(|e| {
            AppError::with_source(ErrorKind::ExternalService, "Failed to read user name", e)
        })?;
        Ok(name.trim().to_string())
    }
}
