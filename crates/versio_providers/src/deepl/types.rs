//! `DeepL` translate API types.
//!
//! See: <https://developers.deepl.com/docs/api-reference/translate>

use serde::{Deserialize, Serialize};

/// Form body of a translate request.
#[derive(Debug, Clone, Serialize)]
pub struct TranslateForm<'a> {
    pub text: &'a str,
    pub target_lang: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_lang: Option<&'a str>,
}

/// Response body of a translate request.
#[derive(Debug, Clone, Deserialize)]
pub struct TranslateResponse {
    #[serde(default)]
    pub translations: Vec<Translation>,
}

/// One translated text.
#[derive(Debug, Clone, Deserialize)]
pub struct Translation {
    pub text: String,
    #[serde(default)]
    pub detected_source_language: Option<String>,
}
