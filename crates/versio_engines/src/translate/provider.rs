//! Translation engine traits.

use super::error::TranslateError;
use super::types::{TranslationRequest, TranslationResult};
use crate::error::EngineError;
use async_trait::async_trait;

/// A translation model loaded into this process.
///
/// Handles are created once by the engine cache and shared between requests,
/// so implementations must tolerate concurrent calls.
pub trait LocalTranslator: Send + Sync + 'static {
    /// Translates `text` from `source_lang` to `target_lang`.
    ///
    /// Engines bound to a single language pair may ignore the language
    /// arguments.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] if tokenization or inference fails.
    fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, EngineError>;
}

/// A remote translation API.
///
/// Implementations validate the request, call the vendor endpoint with the
/// caller's API key and normalize the vendor response.
#[async_trait]
pub trait RemoteTranslator: Send + Sync + 'static {
    /// Sends a translation request to the provider.
    ///
    /// # Errors
    ///
    /// Returns [`TranslateError::Validation`] for missing text or API key,
    /// [`TranslateError::Upstream`] carrying the vendor status for non-success
    /// responses, and [`TranslateError::Http`] for transport failures.
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResult, TranslateError>;
}
