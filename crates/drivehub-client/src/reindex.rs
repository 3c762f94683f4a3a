//! RAG service reindex endpoint.

use async_trait::async_trait;
use reqwest::Url;
use serde::Serialize;
use tracing::info;

use drivehub_core::config::backend::RagConfig;
use drivehub_core::result::AppResult;
use drivehub_core::traits::reindex::{ReindexReport, ReindexSink};

use crate::api::ApiClient;

#[derive(Debug, Serialize)]
struct ReindexRequest<'a> {
    folder_ids: &'a [String],
}

/// Sends the selected folders to the RAG service for reindexing.
#[derive(Debug, Clone)]
pub struct HttpReindexSink {
    api: ApiClient,
    url: Url,
}

impl HttpReindexSink {
    pub fn new(api: ApiClient, config: &RagConfig) -> AppResult<Self> {
        let url = api.url(&config.reindex_path)?;
        Ok(Self { api, url })
    }
}

#[async_trait]
impl ReindexSink for HttpReindexSink {
    async fn reindex(&self, folder_ids: &[String]) -> AppResult<ReindexReport> {
        let body = ReindexRequest { folder_ids };
        let report: ReindexReport = self.api.post_json(self.url.clone(), Some(&body)).await?;
        info!(
            status = %report.status,
            folders = report.folders.len(),
            "Reindex requested"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let ids = vec!["f1".to_string(), "f2".to_string()];
        let body = serde_json::to_value(ReindexRequest { folder_ids: &ids }).unwrap();
        assert_eq!(body, serde_json::json!({ "folder_ids": ["f1", "f2"] }));
    }

    #[test]
    fn test_report_decodes_skipped() {
        let report: ReindexReport =
            serde_json::from_str(r#"{"status":"skipped","reason":"no folder ids"}"#).unwrap();
        assert_eq!(report.status, "skipped");
        assert!(report.folders.is_empty());
        assert_eq!(report.reason.as_deref(), Some("no folder ids"));
    }
}
