//! Anthropic [`RemoteTranslator`] implementation.

use super::client::AnthropicClient;
use super::types::{CreateMessageRequest, MessageParam, MessageResponse};
use async_trait::async_trait;
use serde_json::{Map, Value};
use versio_engines::translate::{
    RemoteTranslator, TranslateError, TranslationRequest, TranslationResult,
};

/// Model used when the request names none.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

const MAX_TOKENS: u32 = 2000;
const TEMPERATURE: f32 = 0.3;

/// Anthropic [`RemoteTranslator`] implementation.
#[derive(Debug, Clone)]
pub struct AnthropicProvider {
    client: AnthropicClient,
}

impl AnthropicProvider {
    /// Creates a provider posting to the Messages endpoint at `url`.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: AnthropicClient::new(url),
        }
    }
}

#[async_trait]
impl RemoteTranslator for AnthropicProvider {
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResult, TranslateError> {
        let (text, api_key) = request.require_text_and_key()?;
        let model = request.model_or(DEFAULT_MODEL);

        let body = CreateMessageRequest {
            model,
            max_tokens: MAX_TOKENS,
            system: request.system_prompt_or_default(),
            messages: vec![MessageParam {
                role: "user",
                content: text,
            }],
            temperature: TEMPERATURE,
        };

        let response = self.client.create_message(api_key, &body).await?;
        convert_response(model, response)
    }
}

fn convert_response(
    model: &str,
    response: MessageResponse,
) -> Result<TranslationResult, TranslateError> {
    let text = response
        .content
        .into_iter()
        .next()
        .and_then(|block| block.text)
        .ok_or_else(|| TranslateError::invalid_response("response contained no text block"))?;

    Ok(TranslationResult::remote(text.trim(), model, "anthropic")
        .with_usage(response.usage.unwrap_or_else(|| Value::Object(Map::new()))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn response_text_is_trimmed() {
        let response: MessageResponse = serde_json::from_value(json!({
            "content": [{"type": "text", "text": "  Hallo Welt\n"}],
            "usage": {"input_tokens": 10, "output_tokens": 4}
        }))
        .unwrap();

        let result = convert_response(DEFAULT_MODEL, response).unwrap();
        assert_eq!(result.translation, "Hallo Welt");
        assert_eq!(result.model.as_deref(), Some(DEFAULT_MODEL));
        assert_eq!(result.usage, Some(json!({"input_tokens": 10, "output_tokens": 4})));
    }

    #[test]
    fn empty_content_is_an_invalid_response() {
        let response: MessageResponse = serde_json::from_value(json!({"content": []})).unwrap();
        let err = convert_response(DEFAULT_MODEL, response).unwrap_err();
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn missing_key_is_rejected_before_any_request() {
        let provider = AnthropicProvider::new("http://127.0.0.1:9/unreachable");
        let err = provider
            .translate(&TranslationRequest::new("Hello"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Text and API key required");
    }
}
