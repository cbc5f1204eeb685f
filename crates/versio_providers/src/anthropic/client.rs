//! Anthropic API client.

use super::types::{CreateMessageRequest, MessageResponse};
use crate::http::{transport_error, upstream_error};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use std::time::Duration;
use versio_engines::translate::TranslateError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTP client for the Anthropic Messages API.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: reqwest::Client,
    url: String,
}

impl AnthropicClient {
    /// Creates a client posting to `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// Sends a create message request using `api_key`.
    pub async fn create_message(
        &self,
        api_key: &str,
        request: &CreateMessageRequest<'_>,
    ) -> Result<MessageResponse, TranslateError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(api_key)
                .map_err(|err| TranslateError::validation(format!("Invalid API key header: {err}")))?,
        );
        headers.insert("anthropic-version", HeaderValue::from_static("2023-06-01"));

        let response = self
            .client
            .post(&self.url)
            .headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .json(request)
            .send()
            .await
            .map_err(|err| transport_error(&err))?;

        let status = response.status();
        let body = response.text().await.map_err(|err| transport_error(&err))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "anthropic request failed");
            return Err(upstream_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|err| {
            TranslateError::invalid_response(format!("Failed to parse response: {err}"))
        })
    }
}
