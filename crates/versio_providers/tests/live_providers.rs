//! Live tests against the real vendor APIs.
//!
//! These tests are ignored by default because they require:
//! - API keys in the environment (or in a `.env` file)
//! - Network access to the vendor APIs
//! - May incur API costs
//!
//! To run these tests:
//! ```sh
//! cargo test -p versio_providers --test live_providers -- --ignored
//! ```

mod common;

use common::init_env;
use versio_engines::translate::TranslationRequest;
use versio_providers::{RemoteEndpoints, remote_registry};

async fn translate_with(provider: &str, key_var: &str) {
    init_env();
    let api_key = std::env::var(key_var).unwrap_or_else(|_| panic!("{key_var} must be set"));

    let registry = remote_registry(&RemoteEndpoints::default());
    let provider = registry.get(provider).expect("provider should be registered");

    let request = TranslationRequest::new("Good morning")
        .languages("en", "de")
        .api_key(api_key)
        .system_prompt("Translate the user's text from English to German. Reply with the translation only.");
    let result = provider.translate(&request).await.expect("translation should succeed");

    assert!(
        result.translation.to_lowercase().contains("morgen"),
        "unexpected translation: {}",
        result.translation
    );
}

#[tokio::test]
#[ignore = "requires ANTHROPIC_API_KEY"]
async fn anthropic_translates() {
    translate_with("anthropic", "ANTHROPIC_API_KEY").await;
}

#[tokio::test]
#[ignore = "requires OPENAI_API_KEY"]
async fn openai_translates() {
    translate_with("openai", "OPENAI_API_KEY").await;
}

#[tokio::test]
#[ignore = "requires DEEPSEEK_API_KEY"]
async fn deepseek_translates() {
    translate_with("deepseek", "DEEPSEEK_API_KEY").await;
}

#[tokio::test]
#[ignore = "requires DEEPL_API_KEY"]
async fn deepl_translates() {
    translate_with("deepl", "DEEPL_API_KEY").await;
}
