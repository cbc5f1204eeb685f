//! NLLB-200 variants.

use super::seq2seq::{PromptStyle, load_seq2seq};
use crate::catalog::{ModelCatalog, ModelSource};
use std::sync::Arc;
use versio_engines::LoadError;
use versio_engines::translate::LocalTranslator;

/// An NLLB-200 checkpoint size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NllbVariant {
    /// Distilled 600M parameters.
    #[default]
    Distilled600M,
    /// Distilled 1.3B parameters.
    Distilled1_3B,
    /// Full 3.3B parameters.
    Full3_3B,
}

impl NllbVariant {
    /// Every variant, smallest first.
    pub const ALL: [Self; 3] = [Self::Distilled600M, Self::Distilled1_3B, Self::Full3_3B];

    /// Returns the variant id used in requests and as the cache key.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Distilled600M => "nllb-200-600m",
            Self::Distilled1_3B => "nllb-200-1.3b",
            Self::Full3_3B => "nllb-200-3.3b",
        }
    }

    /// Returns the upstream checkpoint the variant is exported from.
    #[must_use]
    pub fn checkpoint(self) -> &'static str {
        match self {
            Self::Distilled600M => "facebook/nllb-200-distilled-600M",
            Self::Distilled1_3B => "facebook/nllb-200-distilled-1.3B",
            Self::Full3_3B => "facebook/nllb-200-3.3B",
        }
    }

    /// Parses a variant id. Unknown ids fall back to the 600M variant.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|variant| variant.id() == name)
            .unwrap_or_else(|| {
                tracing::debug!(requested = name, "unknown nllb variant, using nllb-200-600m");
                Self::default()
            })
    }

    /// Returns where the ONNX export of this variant lives.
    #[must_use]
    pub fn source(self, catalog: &ModelCatalog) -> ModelSource {
        let value = match self {
            Self::Distilled600M => &catalog.nllb_600m,
            Self::Distilled1_3B => &catalog.nllb_1_3b,
            Self::Full3_3B => &catalog.nllb_3_3b,
        };
        ModelSource::parse(value)
    }
}

/// Loads an NLLB translator. Blocking; run it on the blocking pool.
///
/// # Errors
///
/// Returns [`LoadError::Unavailable`] in builds without the `onnx` feature,
/// otherwise any fetch or model construction failure.
pub fn load_nllb(
    variant: NllbVariant,
    catalog: &ModelCatalog,
) -> Result<Arc<dyn LocalTranslator>, LoadError> {
    let source = variant.source(catalog);
    tracing::info!(
        variant = variant.id(),
        checkpoint = variant.checkpoint(),
        %source,
        "loading nllb"
    );
    load_seq2seq(&source, catalog, PromptStyle::Nllb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for variant in NllbVariant::ALL {
            assert_eq!(NllbVariant::from_name(variant.id()), variant);
        }
    }

    #[test]
    fn unknown_variant_falls_back_to_600m() {
        assert_eq!(
            NllbVariant::from_name("nllb-200-54b"),
            NllbVariant::Distilled600M
        );
    }

    #[test]
    fn source_follows_catalog() {
        let catalog = ModelCatalog {
            nllb_3_3b: "acme/nllb-3.3b-onnx".to_string(),
            ..ModelCatalog::default()
        };
        assert_eq!(
            NllbVariant::Full3_3B.source(&catalog),
            ModelSource::Hub("acme/nllb-3.3b-onnx".to_string())
        );
    }

    #[cfg(not(feature = "onnx"))]
    #[test]
    fn loading_without_onnx_is_unavailable() {
        let err = load_nllb(NllbVariant::Distilled600M, &ModelCatalog::default())
            .err()
            .expect("expected load error");
        assert!(matches!(err, LoadError::Unavailable(_)));
    }
}
