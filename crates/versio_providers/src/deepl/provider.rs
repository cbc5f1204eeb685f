//! `DeepL` [`RemoteTranslator`] implementation.

use super::client::DeepLClient;
use super::types::{TranslateForm, TranslateResponse};
use async_trait::async_trait;
use versio_engines::translate::{
    RemoteTranslator, TranslateError, TranslationRequest, TranslationResult,
};

/// `DeepL` [`RemoteTranslator`] implementation.
#[derive(Debug, Clone)]
pub struct DeepLProvider {
    client: DeepLClient,
}

impl DeepLProvider {
    /// Creates a provider for the given free and pro endpoints.
    #[must_use]
    pub fn new(free_url: impl Into<String>, pro_url: impl Into<String>) -> Self {
        Self {
            client: DeepLClient::new(free_url, pro_url),
        }
    }
}

/// Converts a language code to the target code `DeepL` expects.
///
/// Codes are uppercased; `EN` and `PT` are ambiguous targets for `DeepL`
/// and become `EN-US` and `PT-BR`. A missing code means `EN-US`.
#[must_use]
pub fn deepl_target_lang(code: Option<&str>) -> String {
    let upper = code.unwrap_or("EN").to_uppercase();
    match upper.as_str() {
        "EN" => "EN-US".to_string(),
        "PT" => "PT-BR".to_string(),
        _ => upper,
    }
}

#[async_trait]
impl RemoteTranslator for DeepLProvider {
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResult, TranslateError> {
        let (text, api_key) = request.require_text_and_key()?;

        let target_lang = deepl_target_lang(request.target_lang.as_deref());
        let source_lang = request
            .source_lang
            .as_deref()
            .filter(|code| !code.is_empty())
            .map(str::to_uppercase);

        let form = TranslateForm {
            text,
            target_lang: &target_lang,
            source_lang: source_lang.as_deref(),
        };

        let response = self.client.translate(api_key, &form).await?;
        convert_response(response)
    }
}

fn convert_response(response: TranslateResponse) -> Result<TranslationResult, TranslateError> {
    let translation = response
        .translations
        .into_iter()
        .next()
        .ok_or_else(|| TranslateError::invalid_response("response contained no translations"))?;

    Ok(TranslationResult {
        translation: translation.text,
        model: None,
        provider: "deepl".to_string(),
        local: false,
        usage: None,
        source_lang: Some(translation.detected_source_language.unwrap_or_default()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ambiguous_targets_are_regionalized() {
        assert_eq!(deepl_target_lang(Some("en")), "EN-US");
        assert_eq!(deepl_target_lang(Some("pt")), "PT-BR");
        assert_eq!(deepl_target_lang(Some("de")), "DE");
        assert_eq!(deepl_target_lang(Some("en-gb")), "EN-GB");
        assert_eq!(deepl_target_lang(None), "EN-US");
    }

    #[test]
    fn free_keys_use_free_endpoint() {
        let client = DeepLClient::new("http://free", "http://pro");
        assert_eq!(client.endpoint_for("abc:fx"), "http://free");
        assert_eq!(client.endpoint_for("abc"), "http://pro");
    }

    #[test]
    fn detected_source_language_is_reported() {
        let response: TranslateResponse = serde_json::from_value(json!({
            "translations": [{"detected_source_language": "EN", "text": "Hallo"}]
        }))
        .unwrap();

        let value = serde_json::to_value(convert_response(response).unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "translation": "Hallo",
                "source_lang": "EN",
                "provider": "deepl",
                "local": false
            })
        );
    }
}
