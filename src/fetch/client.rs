use std::time::Duration;

use crate::fetch::wire::{QueryPage, QueryRequest};
use crate::runner::RunnerError;

pub const DEFAULT_API_BASE: &str = "https://api.notion.com/v1";
pub const API_VERSION: &str = "2022-06-28";

/// HTTP client for the collection query endpoint. Read-only against the
/// remote store; the bearer token is attached per request.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    pub fn new(base_url: &str, token: &str, timeout_seconds: usize) -> Result<Self, RunnerError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "notion-version",
            reqwest::header::HeaderValue::from_static(API_VERSION),
        );

        let timeout = Duration::from_secs(timeout_seconds.try_into().unwrap_or(30));
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| RunnerError::HttpClientBuild { source: e })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    pub async fn query_page(
        &self,
        collection: &str,
        page_size: u32,
        cursor: Option<String>,
    ) -> Result<QueryPage, RunnerError> {
        let url = format!("{}/databases/{}/query", self.base_url, collection);
        let body = QueryRequest {
            page_size,
            start_cursor: cursor,
        };

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| RunnerError::Transport { source: e })?;

        let status = resp.status().as_u16();
        if !(200..300).contains(&status) {
            let body = resp.text().await.unwrap_or_default();
            return Err(RunnerError::Api {
                status,
                message: error_snippet(&body),
            });
        }

        resp.json::<QueryPage>()
            .await
            .map_err(|e| RunnerError::Decode { source: e })
    }
}

/// Pulls the remote's own message out of an error body when it is the usual
/// JSON error object, otherwise returns a trimmed sample of the body.
fn error_snippet(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }
    body.trim().chars().take(300).collect()
}
