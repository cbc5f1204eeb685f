//! Translation providers and metric scorers for Versio.
//!
//! # Supported Providers
//!
//! | Provider | Feature Flag | Kind | Description |
//! |----------|--------------|------|-------------|
//! | Anthropic | `anthropic` (default) | remote | Anthropic Messages API |
//! | `OpenAI`, `DeepSeek` | `openai` (default) | remote | Chat Completions API |
//! | `DeepL` | `deepl` (default) | remote | `DeepL` translate API |
//! | Argos | `argos` (default) | local | Installable phrase-table packages |
//! | NLLB-200, OPUS-MT | `onnx` | local | Seq2seq models run with ONNX Runtime |
//!
//! The four metric scorers (BERTScore, COMET, COMET-QE, BLEURT) also need the
//! `onnx` feature. Without it their loaders fail with
//! [`LoadError::Unavailable`](versio_engines::LoadError::Unavailable) and the
//! status endpoints report the families as unavailable.
//!
//! # Feature Flags
//!
//! ```toml
//! # Remote providers and Argos (default)
//! versio_providers = { path = "../versio_providers" }
//!
//! # Everything, including local neural models and metrics
//! versio_providers = { path = "../versio_providers", features = ["onnx"] }
//! ```
//!
//! # Usage
//!
//! Remote providers are registered once at startup:
//!
//! ```
//! use versio_providers::{RemoteEndpoints, remote_registry};
//!
//! let registry = remote_registry(&RemoteEndpoints::default());
//! # #[cfg(feature = "deepl")]
//! assert!(registry.has("deepl"));
//! ```
//!
//! Local engines are built by loader functions and handed to an
//! [`EngineCache`](versio_engines::EngineCache), which calls them on first use.

mod catalog;
mod codec;
mod device;
mod endpoints;
mod http;

#[cfg(feature = "anthropic")]
pub mod anthropic;

#[cfg(feature = "openai")]
pub mod openai;

#[cfg(feature = "deepl")]
pub mod deepl;

#[cfg(feature = "argos")]
pub mod argos;

pub mod local;
pub mod metrics;

#[cfg(feature = "onnx")]
mod onnx;

pub use catalog::{
    ESTIMATOR_FILES, ModelCatalog, ModelSource, SEQ2SEQ_FILES, SINGLE_GRAPH_FILES, metric_files,
};
pub use codec::TextCodec;
pub use device::{detect_device, neural_capability};
pub use endpoints::RemoteEndpoints;

#[cfg(feature = "anthropic")]
pub use anthropic::AnthropicProvider;

#[cfg(feature = "openai")]
pub use openai::ChatCompletionsProvider;

#[cfg(feature = "deepl")]
pub use deepl::DeepLProvider;

use versio_engines::ProviderRegistry;

/// Builds a registry holding every remote provider compiled into this build.
#[must_use]
pub fn remote_registry(endpoints: &RemoteEndpoints) -> ProviderRegistry {
    #[cfg_attr(
        not(any(feature = "anthropic", feature = "openai", feature = "deepl")),
        expect(unused_mut, reason = "no remote provider features enabled")
    )]
    let mut registry = ProviderRegistry::new();

    #[cfg(feature = "anthropic")]
    registry.register(
        "anthropic",
        std::sync::Arc::new(AnthropicProvider::new(&endpoints.anthropic)),
    );

    #[cfg(feature = "openai")]
    {
        registry.register(
            "openai",
            std::sync::Arc::new(ChatCompletionsProvider::openai(&endpoints.openai)),
        );
        registry.register(
            "deepseek",
            std::sync::Arc::new(ChatCompletionsProvider::deepseek(&endpoints.deepseek)),
        );
    }

    #[cfg(feature = "deepl")]
    registry.register(
        "deepl",
        std::sync::Arc::new(DeepLProvider::new(&endpoints.deepl_free, &endpoints.deepl_pro)),
    );

    tracing::debug!(providers = ?registry.names(), "remote providers registered");

    #[cfg(not(any(feature = "anthropic", feature = "openai", feature = "deepl")))]
    let _ = endpoints;

    registry
}
