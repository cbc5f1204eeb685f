//! Error taxonomy of the translation dispatcher.

use crate::error::EngineError;

/// Errors returned by translation providers.
///
/// Every variant maps to an HTTP status through [`status_code`](Self::status_code).
/// Display strings are the messages shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    /// Missing or empty request fields.
    #[error("{0}")]
    Validation(String),

    /// A language code the provider family cannot map.
    #[error("Unsupported language: {source_lang} or {target_lang}")]
    UnsupportedLanguage {
        /// Requested source language.
        source_lang: String,
        /// Requested target language.
        target_lang: String,
    },

    /// The language pair has no installed or installable package.
    #[error("{message}")]
    PairUnavailable {
        /// Description of the missing pair.
        message: String,
        /// Pairs that are installed, to help the caller pick another.
        installed_pairs: Vec<String>,
    },

    /// The model could not be loaded or its library is missing.
    #[error("{0}")]
    Unavailable(String),

    /// The remote API answered with a non-success status.
    #[error("{message}")]
    Upstream {
        /// HTTP status returned by the vendor.
        status: u16,
        /// Message extracted from the vendor response.
        message: String,
    },

    /// Transport failure talking to a remote API (connect, timeout, body read).
    #[error("{0}")]
    Http(String),

    /// The remote API answered with success but an unexpected body.
    #[error("{0}")]
    InvalidResponse(String),

    /// Inference failed inside a loaded engine.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// No provider is registered under the requested name.
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
}

impl TranslateError {
    /// Creates a [`Validation`](Self::Validation) error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates an [`Unavailable`](Self::Unavailable) error.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Creates an [`InvalidResponse`](Self::InvalidResponse) error.
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::UnsupportedLanguage { .. } | Self::PairUnavailable { .. } => {
                400
            }
            Self::UnknownProvider(_) => 404,
            Self::Upstream { status, .. } => *status,
            Self::Unavailable(_) | Self::Http(_) | Self::InvalidResponse(_) | Self::Engine(_) => {
                500
            }
        }
    }

    /// Returns the installed pairs attached to a [`PairUnavailable`](Self::PairUnavailable) error.
    #[must_use]
    pub fn installed_pairs(&self) -> Option<&[String]> {
        match self {
            Self::PairUnavailable {
                installed_pairs, ..
            } => Some(installed_pairs),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_status_is_forwarded() {
        let err = TranslateError::Upstream {
            status: 429,
            message: "rate limited".to_string(),
        };
        assert_eq!(err.status_code(), 429);
        assert_eq!(err.to_string(), "rate limited");
    }

    #[test]
    fn unsupported_language_message_names_both_codes() {
        let err = TranslateError::UnsupportedLanguage {
            source_lang: "xx".to_string(),
            target_lang: "de".to_string(),
        };
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_string(), "Unsupported language: xx or de");
    }

    #[test]
    fn engine_failures_are_server_errors() {
        let err = TranslateError::from(EngineError::inference("bad logits shape"));
        assert_eq!(err.status_code(), 500);
        assert!(err.installed_pairs().is_none());
    }

    #[test]
    fn missing_pair_lists_installed_pairs() {
        let err = TranslateError::PairUnavailable {
            message: "Argos: en-xx not available".to_string(),
            installed_pairs: vec!["en-de".to_string()],
        };
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.installed_pairs(), Some(&["en-de".to_string()][..]));
    }
}
