//! Chat Completions API types.
//!
//! See: <https://platform.openai.com/docs/api-reference/chat>

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for the Chat Completions API.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    /// The model to use.
    pub model: &'a str,
    /// System and user messages.
    pub messages: [ChatMessage<'a>; 2],
    /// Temperature for sampling.
    pub temperature: f32,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
}

/// A chat message.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

/// Response body from the Chat Completions API.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Generated choices.
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Token usage, passed through unchanged.
    #[serde(default)]
    pub usage: Option<Value>,
}

/// A single generated choice.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

/// The assistant message of a choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}
