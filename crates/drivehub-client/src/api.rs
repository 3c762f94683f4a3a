//! Shared HTTP plumbing.

use std::time::Duration;

use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use reqwest::{Client, Response, Url};
use serde::Serialize;
use tracing::debug;

use drivehub_core::config::backend::{BackendConfig, RagConfig};
use drivehub_core::error::{AppError, ErrorKind};
use drivehub_core::result::AppResult;

/// A base URL plus a configured `reqwest` client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: Url,
    client: Client,
}

impl ApiClient {
    /// Build a client for `base_url`. The session cookie, when given, is
    /// sent on every request.
    pub fn new(base_url: &str, timeout_seconds: u64, session_cookie: Option<&str>) -> AppResult<Self> {
        let base = Url::parse(base_url).map_err(|e| {
            AppError::configuration(format!("Invalid base URL {base_url:?}: {e}"))
        })?;

        let mut headers = HeaderMap::new();
        if let Some(cookie) = session_cookie.filter(|c| !c.trim().is_empty()) {
            let value = HeaderValue::from_str(cookie)
                .map_err(|e| AppError::configuration(format!("Invalid session cookie: {e}")))?;
            headers.insert(COOKIE, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "Failed to build HTTP client",
                    e,
                )
            })?;

        Ok(Self { base, client })
    }

    /// Client for the REST backend.
    pub fn from_backend(config: &BackendConfig) -> AppResult<Self> {
        Self::new(
            &config.base_url,
            config.timeout_seconds,
            config.session_cookie.as_deref(),
        )
    }

    /// Client for the RAG service.
    pub fn from_rag(config: &RagConfig) -> AppResult<Self> {
        Self::new(&config.base_url, config.timeout_seconds, None)
    }

    /// Base URL joined with an absolute or relative `path`.
    pub fn url(&self, path: &str) -> AppResult<Url> {
        self.base
            .join(path)
            .map_err(|e| AppError::configuration(format!("Invalid endpoint path {path:?}: {e}")))
    }

    /// POST with an optional JSON body; non-2xx statuses are errors.
    pub async fn post<B: Serialize + ?Sized>(&self, url: Url, body: Option<&B>) -> AppResult<Response> {
        debug!(url = %url, "POST");
        let mut request = self.client.post(url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(|e| send_error(&url, e))?;
        check_status(response).await
    }

    /// POST and decode the JSON response.
    pub async fn post_json<B, T>(&self, url: Url, body: Option<&B>) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: serde::de::DeserializeOwned,
    {
        let response = self.post(url, body).await?;
        response.json::<T>().await.map_err(|e| {
            AppError::with_source(ErrorKind::Serialization, "Malformed JSON response", e)
        })
    }
}

fn send_error(url: &Url, err: reqwest::Error) -> AppError {
    let kind = if err.is_connect() || err.is_timeout() {
        ErrorKind::ServiceUnavailable
    } else {
        ErrorKind::ExternalService
    };
    AppError::with_source(kind, format!("Request to {url} failed: {err}"), err)
}

async fn check_status(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let url = response.url().clone();
    let body = response.text().await.unwrap_or_default();
    let snippet: String = body.chars().take(200).collect();
    Err(AppError::external(format!(
        "{url} answered {status}: {snippet}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_paths() {
        let api = ApiClient::new("http://localhost:8090", 5, None).unwrap();
        assert_eq!(
            api.url("/fav/list").unwrap().as_str(),
            "http://localhost:8090/fav/list"
        );
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let err = ApiClient::new("not a url", 5, None).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_rejects_bad_cookie() {
        assert!(ApiClient::new("http://localhost", 5, Some("bad\ncookie")).is_err());
        assert!(ApiClient::new("http://localhost", 5, Some("JSESSIONID=abc")).is_ok());
    }

    #[test]
    fn test_from_configs() {
        assert!(ApiClient::from_backend(&BackendConfig::default()).is_ok());
        let rag = ApiClient::from_rag(&RagConfig::default()).unwrap();
        assert_eq!(rag.url("/reindex").unwrap().as_str(), "http://127.0.0.1:8000/reindex");
    }
}
