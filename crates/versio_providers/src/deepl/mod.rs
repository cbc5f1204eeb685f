//! `DeepL` provider backend.
//!
//! Keys ending in `:fx` belong to the free tier and are sent to the free
//! endpoint; every other key goes to the pro endpoint.

mod client;
mod provider;
mod types;

pub use provider::{DeepLProvider, deepl_target_lang};
