//! OPUS-MT bilingual models.

use super::languages::is_language_code;
use super::seq2seq::{PromptStyle, load_seq2seq};
use crate::catalog::ModelCatalog;
use std::sync::Arc;
use versio_engines::LoadError;
use versio_engines::translate::LocalTranslator;

/// Returns the engine id of the OPUS-MT model for a language pair.
#[must_use]
pub fn opus_id(src: &str, tgt: &str) -> String {
    format!("opus-mt-{src}-{tgt}")
}

/// Loads the OPUS-MT translator for a pair. Blocking; run it on the blocking
/// pool.
///
/// # Errors
///
/// Returns [`LoadError::Unavailable`] for codes that are not ASCII
/// alphanumeric and in builds without the `onnx` feature, otherwise any fetch
/// or model construction failure, including a pair with no published model.
pub fn load_opus(
    src: &str,
    tgt: &str,
    catalog: &ModelCatalog,
) -> Result<Arc<dyn LocalTranslator>, LoadError> {
    if !(is_language_code(src) && is_language_code(tgt)) {
        return Err(LoadError::unavailable(format!(
            "invalid language pair {src:?}-{tgt:?}"
        )));
    }
    let source = catalog.opus_source(src, tgt);
    tracing::info!(pair = %format!("{src}-{tgt}"), %source, "loading opus-mt");
    load_seq2seq(&source, catalog, PromptStyle::Marian)
}
