//! Chat Completions [`RemoteTranslator`] implementation.

use super::client::ChatClient;
use super::types::{ChatMessage, ChatRequest, ChatResponse};
use async_trait::async_trait;
use serde_json::{Map, Value};
use versio_engines::translate::{
    RemoteTranslator, TranslateError, TranslationRequest, TranslationResult,
};

/// Default `OpenAI` model.
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4o";

/// Default `DeepSeek` model.
pub const DEEPSEEK_DEFAULT_MODEL: &str = "deepseek-chat";

const MAX_TOKENS: u32 = 2000;
const TEMPERATURE: f32 = 0.3;

/// [`RemoteTranslator`] for any Chat Completions compatible API.
#[derive(Debug, Clone)]
pub struct ChatCompletionsProvider {
    client: ChatClient,
    provider: &'static str,
    default_model: &'static str,
}

impl ChatCompletionsProvider {
    /// Creates a provider reported as `provider` that falls back to
    /// `default_model`.
    #[must_use]
    pub fn new(url: impl Into<String>, provider: &'static str, default_model: &'static str) -> Self {
        Self {
            client: ChatClient::new(url),
            provider,
            default_model,
        }
    }

    /// Creates the `OpenAI` provider.
    #[must_use]
    pub fn openai(url: impl Into<String>) -> Self {
        Self::new(url, "openai", OPENAI_DEFAULT_MODEL)
    }

    /// Creates the `DeepSeek` provider.
    #[must_use]
    pub fn deepseek(url: impl Into<String>) -> Self {
        Self::new(url, "deepseek", DEEPSEEK_DEFAULT_MODEL)
    }
}

#[async_trait]
impl RemoteTranslator for ChatCompletionsProvider {
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResult, TranslateError> {
        let (text, api_key) = request.require_text_and_key()?;
        let model = request.model_or(self.default_model);

        let body = ChatRequest {
            model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: request.system_prompt_or_default(),
                },
                ChatMessage {
                    role: "user",
                    content: text,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self.client.create_chat_completion(api_key, &body).await?;
        convert_response(self.provider, model, response)
    }
}

fn convert_response(
    provider: &str,
    model: &str,
    response: ChatResponse,
) -> Result<TranslationResult, TranslateError> {
    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| TranslateError::invalid_response("response contained no choices"))?;

    Ok(TranslationResult::remote(content.trim(), model, provider)
        .with_usage(response.usage.unwrap_or_else(|| Value::Object(Map::new()))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_choice_is_used() {
        let response: ChatResponse = serde_json::from_value(json!({
            "choices": [
                {"message": {"role": "assistant", "content": "\nBonjour\n"}},
                {"message": {"role": "assistant", "content": "Salut"}}
            ],
            "usage": {"prompt_tokens": 20, "completion_tokens": 2, "total_tokens": 22}
        }))
        .unwrap();

        let result = convert_response("deepseek", DEEPSEEK_DEFAULT_MODEL, response).unwrap();
        assert_eq!(result.translation, "Bonjour");
        assert_eq!(result.provider, "deepseek");
        assert_eq!(result.usage.unwrap()["total_tokens"], json!(22));
    }

    #[test]
    fn absent_usage_becomes_an_empty_object() {
        let response: ChatResponse = serde_json::from_value(json!({
            "choices": [{"message": {"role": "assistant", "content": "Hallo"}}]
        }))
        .unwrap();

        let result = convert_response("openai", OPENAI_DEFAULT_MODEL, response).unwrap();
        assert_eq!(result.usage, Some(json!({})));
    }

    #[test]
    fn request_serializes_system_then_user() {
        let body = ChatRequest {
            model: OPENAI_DEFAULT_MODEL,
            messages: [
                ChatMessage {
                    role: "system",
                    content: "sys",
                },
                ChatMessage {
                    role: "user",
                    content: "Hello",
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["messages"][0]["role"], json!("system"));
        assert_eq!(value["messages"][1]["content"], json!("Hello"));
        assert_eq!(value["max_tokens"], json!(2000));
    }
}
