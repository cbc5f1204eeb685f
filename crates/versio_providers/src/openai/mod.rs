//! Chat Completions provider backend.
//!
//! Serves both `OpenAI` and `DeepSeek`, which share the Chat Completions wire
//! format and differ only in endpoint and default model.

mod client;
mod provider;
mod types;

pub use provider::{ChatCompletionsProvider, DEEPSEEK_DEFAULT_MODEL, OPENAI_DEFAULT_MODEL};
