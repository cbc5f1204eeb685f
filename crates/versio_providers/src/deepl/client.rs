//! `DeepL` API client.

use super::types::{TranslateForm, TranslateResponse};
use crate::http::transport_error;
use std::time::Duration;
use versio_engines::translate::TranslateError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the `DeepL` translate endpoints.
#[derive(Debug, Clone)]
pub struct DeepLClient {
    client: reqwest::Client,
    free_url: String,
    pro_url: String,
}

impl DeepLClient {
    /// Creates a client for the given free and pro endpoints.
    pub fn new(free_url: impl Into<String>, pro_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            free_url: free_url.into(),
            pro_url: pro_url.into(),
        }
    }

    /// Returns the endpoint serving `api_key`.
    pub fn endpoint_for(&self, api_key: &str) -> &str {
        if api_key.ends_with(":fx") {
            &self.free_url
        } else {
            &self.pro_url
        }
    }

    /// Sends a form-encoded translate request.
    pub async fn translate(
        &self,
        api_key: &str,
        form: &TranslateForm<'_>,
    ) -> Result<TranslateResponse, TranslateError> {
        let url = self.endpoint_for(api_key);

        let response = self
            .client
            .post(url)
            .header("Authorization", format!("DeepL-Auth-Key {api_key}"))
            .timeout(REQUEST_TIMEOUT)
            .form(form)
            .send()
            .await
            .map_err(|err| transport_error(&err))?;

        let status = response.status();
        let body = response.text().await.map_err(|err| transport_error(&err))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "deepl request failed");
            return Err(TranslateError::Upstream {
                status: status.as_u16(),
                message: format!("DeepL: {body}"),
            });
        }

        serde_json::from_str(&body).map_err(|err| {
            TranslateError::invalid_response(format!("Failed to parse response: {err}"))
        })
    }
}
