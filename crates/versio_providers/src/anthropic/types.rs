//! Anthropic Messages API types.
//!
//! Only the fields used for translation are modeled.
//! See: <https://docs.anthropic.com/en/api/messages>

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for the Messages API.
#[derive(Debug, Clone, Serialize)]
pub struct CreateMessageRequest<'a> {
    /// The model to use.
    pub model: &'a str,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// System prompt.
    pub system: &'a str,
    /// Input messages.
    pub messages: Vec<MessageParam<'a>>,
    /// Temperature for sampling.
    pub temperature: f32,
}

/// A user message.
#[derive(Debug, Clone, Serialize)]
pub struct MessageParam<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

/// Response body from the Messages API.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    /// Content blocks.
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    /// Token usage, passed through unchanged.
    #[serde(default)]
    pub usage: Option<Value>,
}

/// Content block in a response.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentBlock {
    /// Block text. Absent for non-text blocks.
    #[serde(default)]
    pub text: Option<String>,
}
