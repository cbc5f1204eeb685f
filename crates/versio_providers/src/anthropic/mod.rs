//! Anthropic provider backend.
//!
//! Uses the Anthropic Messages API. The API key travels with each request.
//!
//! ```
//! # use versio_providers::anthropic::AnthropicProvider;
//! let provider = AnthropicProvider::new("https://api.anthropic.com/v1/messages");
//! ```

mod client;
mod provider;
mod types;

pub use provider::{AnthropicProvider, DEFAULT_MODEL};
