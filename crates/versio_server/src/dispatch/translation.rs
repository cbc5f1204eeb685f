//! Translation dispatch.

use super::run_blocking;
use crate::context::Engines;
use std::sync::Arc;
use versio_engines::translate::{
    LocalTranslator, TranslateError, TranslationRequest, TranslationResult,
};
use versio_providers::argos::argos_id;
use versio_providers::local::{NllbVariant, flores_code, opus_id};

/// Local translation families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalFamily {
    /// Installable phrase-table packages.
    Argos,
    /// NLLB-200 multilingual models.
    Nllb,
    /// OPUS-MT bilingual models.
    Opus,
}

impl LocalFamily {
    /// Returns the provider name used in routes and results.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Argos => "argos",
            Self::Nllb => "nllb",
            Self::Opus => "opus",
        }
    }

    /// Looks up a family by provider name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        [Self::Argos, Self::Nllb, Self::Opus]
            .into_iter()
            .find(|family| family.name() == name)
    }
}

/// Translates `request` with the provider called `provider`.
///
/// Local families are served from the engine cache; any other name is looked
/// up in the remote provider registry.
///
/// # Errors
///
/// Returns a [`TranslateError`] carrying the message and status code for the
/// caller.
pub async fn translate(
    engines: &Engines,
    provider: &str,
    request: TranslationRequest,
) -> Result<TranslationResult, TranslateError> {
    match LocalFamily::from_name(provider) {
        Some(LocalFamily::Argos) => translate_argos(engines, request).await,
        Some(LocalFamily::Nllb) => translate_nllb(engines, request).await,
        Some(LocalFamily::Opus) => translate_opus(engines, request).await,
        None => {
            let remote = engines
                .remote
                .get(provider)
                .ok_or_else(|| TranslateError::UnknownProvider(provider.to_string()))?;
            remote.translate(&request).await
        }
    }
}

async fn translate_argos(
    engines: &Engines,
    request: TranslationRequest,
) -> Result<TranslationResult, TranslateError> {
    let text = request.require_text()?.to_string();
    let (src, tgt) = languages(&request);
    let id = argos_id(&src, &tgt);

    let translator = engines
        .translators
        .get_or_load(&id, || async {
            engines
                .argos
                .load(&src, &tgt)
                .await
                .map(|table| table as Arc<dyn LocalTranslator>)
        })
        .await
        .map_err(|err| {
            tracing::warn!(pair = %format!("{src}-{tgt}"), error = %err, "argos pair unavailable");
            TranslateError::PairUnavailable {
                message: format!("Argos: {src}-{tgt} not available"),
                installed_pairs: engines.argos.installed_pairs(),
            }
        })?;

    let translation = run_local(translator, text, src, tgt).await?;
    Ok(TranslationResult::local(translation, id, LocalFamily::Argos.name()))
}

async fn translate_nllb(
    engines: &Engines,
    request: TranslationRequest,
) -> Result<TranslationResult, TranslateError> {
    let text = request.require_text()?.to_string();
    let (src, tgt) = languages(&request);
    if flores_code(&src).is_none() || flores_code(&tgt).is_none() {
        return Err(TranslateError::UnsupportedLanguage {
            source_lang: src,
            target_lang: tgt,
        });
    }

    let requested = request
        .model_or(NllbVariant::default().id())
        .to_string();
    let variant = NllbVariant::from_name(&requested);
    let loader = Arc::clone(&engines.loader);

    let translator = engines
        .translators
        .get_or_load_blocking(variant.id(), move || loader.nllb(variant))
        .await
        .map_err(|err| {
            tracing::warn!(variant = %requested, error = %err, "nllb load failed");
            TranslateError::unavailable(format!("NLLB {requested} not available"))
        })?;

    let translation = run_local(translator, text, src, tgt).await?;
    Ok(TranslationResult::local(translation, requested, LocalFamily::Nllb.name()))
}

async fn translate_opus(
    engines: &Engines,
    request: TranslationRequest,
) -> Result<TranslationResult, TranslateError> {
    let text = request.require_text()?.to_string();
    let (src, tgt) = languages(&request);
    let id = opus_id(&src, &tgt);
    let loader = Arc::clone(&engines.loader);

    let translator = {
        let (src, tgt) = (src.clone(), tgt.clone());
        engines
            .translators
            .get_or_load_blocking(&id, move || loader.opus(&src, &tgt))
            .await
    }
    .map_err(|err| {
        tracing::warn!(model = %id, error = %err, "opus-mt load failed");
        TranslateError::unavailable(format!("OPUS-MT {src}-{tgt} not available"))
    })?;

    let translation = run_local(translator, text, src, tgt).await?;
    Ok(TranslationResult::local(translation, id, LocalFamily::Opus.name()))
}

fn languages(request: &TranslationRequest) -> (String, String) {
    (
        request.source_or_default().to_string(),
        request.target_or_default().to_string(),
    )
}

async fn run_local(
    translator: Arc<dyn LocalTranslator>,
    text: String,
    src: String,
    tgt: String,
) -> Result<String, TranslateError> {
    let translation = run_blocking(move || translator.translate(&text, &src, &tgt)).await?;
    Ok(translation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_names_round_trip() {
        for family in [LocalFamily::Argos, LocalFamily::Nllb, LocalFamily::Opus] {
            assert_eq!(LocalFamily::from_name(family.name()), Some(family));
        }
        assert_eq!(LocalFamily::from_name("deepl"), None);
    }
}
