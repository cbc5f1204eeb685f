//! Chat Completions API client.

use super::types::{ChatRequest, ChatResponse};
use crate::http::{transport_error, upstream_error};
use std::time::Duration;
use versio_engines::translate::TranslateError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTP client for a Chat Completions endpoint.
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    url: String,
}

impl ChatClient {
    /// Creates a client posting to `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// Sends a chat completion request authenticated with `api_key`.
    pub async fn create_chat_completion(
        &self,
        api_key: &str,
        request: &ChatRequest<'_>,
    ) -> Result<ChatResponse, TranslateError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .timeout(REQUEST_TIMEOUT)
            .json(request)
            .send()
            .await
            .map_err(|err| transport_error(&err))?;

        let status = response.status();
        let body = response.text().await.map_err(|err| transport_error(&err))?;

        if !status.is_success() {
            tracing::warn!(url = %self.url, status = status.as_u16(), "chat completion failed");
            return Err(upstream_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|err| {
            TranslateError::invalid_response(format!("Failed to parse response: {err}"))
        })
    }
}
