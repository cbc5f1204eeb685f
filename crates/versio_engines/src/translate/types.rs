//! Translation request and result types.

use super::error::TranslateError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Source language assumed when a request omits one.
pub const DEFAULT_SOURCE_LANG: &str = "en";

/// Target language assumed when a request omits one.
pub const DEFAULT_TARGET_LANG: &str = "de";

/// System prompt sent to chat providers when a request omits one.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a professional translator.";

/// A translation request as received from the frontend.
///
/// Every field is optional on the wire; accessors apply the defaults and the
/// validation rules shared by all providers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    /// Text to translate.
    #[serde(default)]
    pub text: Option<String>,
    /// Source language code.
    #[serde(default)]
    pub source_lang: Option<String>,
    /// Target language code.
    #[serde(default)]
    pub target_lang: Option<String>,
    /// Provider-specific model name or variant.
    #[serde(default)]
    pub model: Option<String>,
    /// API key for remote providers. Used for this request only.
    #[serde(default)]
    pub api_key: Option<String>,
    /// System prompt for chat providers.
    #[serde(default)]
    pub system_prompt: Option<String>,
}

impl TranslationRequest {
    /// Creates a request for `text` with every other field unset.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Sets the source and target languages.
    #[must_use]
    pub fn languages(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.source_lang = Some(source.into());
        self.target_lang = Some(target.into());
        self
    }

    /// Sets the model name.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the API key.
    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the system prompt.
    #[must_use]
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Returns the text to translate.
    ///
    /// # Errors
    ///
    /// Returns [`TranslateError::Validation`] if the text is missing or empty.
    pub fn require_text(&self) -> Result<&str, TranslateError> {
        non_empty(self.text.as_deref()).ok_or_else(|| TranslateError::validation("Text required"))
    }

    /// Returns the text and the API key.
    ///
    /// # Errors
    ///
    /// Returns [`TranslateError::Validation`] if either is missing or empty.
    pub fn require_text_and_key(&self) -> Result<(&str, &str), TranslateError> {
        match (non_empty(self.text.as_deref()), non_empty(self.api_key.as_deref())) {
            (Some(text), Some(key)) => Ok((text, key)),
            _ => Err(TranslateError::validation("Text and API key required")),
        }
    }

    /// Returns the source language, defaulting to [`DEFAULT_SOURCE_LANG`].
    #[must_use]
    pub fn source_or_default(&self) -> &str {
        self.source_lang.as_deref().unwrap_or(DEFAULT_SOURCE_LANG)
    }

    /// Returns the target language, defaulting to [`DEFAULT_TARGET_LANG`].
    #[must_use]
    pub fn target_or_default(&self) -> &str {
        self.target_lang.as_deref().unwrap_or(DEFAULT_TARGET_LANG)
    }

    /// Returns the model name, or `default` if none was given.
    #[must_use]
    pub fn model_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.model.as_deref().unwrap_or(default)
    }

    /// Returns the system prompt, defaulting to [`DEFAULT_SYSTEM_PROMPT`].
    #[must_use]
    pub fn system_prompt_or_default(&self) -> &str {
        self.system_prompt.as_deref().unwrap_or(DEFAULT_SYSTEM_PROMPT)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// A normalized translation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResult {
    /// The translated text.
    pub translation: String,
    /// Model or variant that produced the translation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Provider family name (e.g. `nllb`, `anthropic`).
    pub provider: String,
    /// Whether inference ran in this process.
    pub local: bool,
    /// Token usage as reported by the vendor, passed through unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Value>,
    /// Source language detected by the vendor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_lang: Option<String>,
}

impl TranslationResult {
    /// Creates a result produced by a local engine.
    #[must_use]
    pub fn local(
        translation: impl Into<String>,
        model: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            translation: translation.into(),
            model: Some(model.into()),
            provider: provider.into(),
            local: true,
            usage: None,
            source_lang: None,
        }
    }

    /// Creates a result produced by a remote API.
    #[must_use]
    pub fn remote(
        translation: impl Into<String>,
        model: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            translation: translation.into(),
            model: Some(model.into()),
            provider: provider.into(),
            local: false,
            usage: None,
            source_lang: None,
        }
    }

    /// Attaches vendor usage metadata.
    #[must_use]
    pub fn with_usage(mut self, usage: Value) -> Self {
        self.usage = Some(usage);
        self
    }

    /// Attaches the detected source language.
    #[must_use]
    pub fn with_source_lang(mut self, source_lang: impl Into<String>) -> Self {
        self.source_lang = Some(source_lang.into());
        self
    }
}
