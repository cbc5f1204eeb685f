//! Metric scorers: BERTScore, COMET, COMET-QE and BLEURT.
//!
//! Scoring logic is written against small model traits ([`TokenEmbedder`],
//! [`SentenceEncoder`], [`PairEncoder`], [`Estimator`], [`PairRegressor`]).
//! The `onnx` feature implements them with ONNX Runtime; [`load_scorer`]
//! wires the implementations to the model sources in a
//! [`ModelCatalog`].

mod bertscore;
mod bleurt;
mod comet;
mod pooling;

pub use bertscore::{BertScorer, greedy_match};
pub use bleurt::BleurtScorer;
pub use comet::{CometQeScorer, CometScorer, comet_features, qe_features};
pub use pooling::{cosine, first_token, masked_mean};

use crate::catalog::ModelCatalog;
use std::sync::Arc;
use versio_engines::metric::{MetricKind, Scorer};
use versio_engines::{EngineError, LoadError};

/// Produces one contextual embedding per non-special token.
pub trait TokenEmbedder: Send + Sync + 'static {
    /// Embeds the tokens of `text`.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] if tokenization or inference fails.
    fn embed_tokens(&self, text: &str) -> Result<Vec<Vec<f32>>, EngineError>;
}

/// Produces one pooled embedding per sentence.
pub trait SentenceEncoder: Send + Sync + 'static {
    /// Embeds `text`.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] if tokenization or inference fails.
    fn encode(&self, text: &str) -> Result<Vec<f32>, EngineError>;
}

/// Produces one pooled embedding for two sentences encoded together.
pub trait PairEncoder: Send + Sync + 'static {
    /// Embeds `first` and `second` as a single sequence pair.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] if tokenization or inference fails.
    fn encode_pair(&self, first: &str, second: &str) -> Result<Vec<f32>, EngineError>;
}

/// Regression head mapping a feature vector to a score.
pub trait Estimator: Send + Sync + 'static {
    /// Predicts a score for `features`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Inference`] if the model fails.
    fn estimate(&self, features: &[f32]) -> Result<f32, EngineError>;
}

/// End-to-end regression over a sequence pair.
pub trait PairRegressor: Send + Sync + 'static {
    /// Predicts a score for `first` and `second` encoded as a pair.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] if tokenization or inference fails.
    fn regress(&self, first: &str, second: &str) -> Result<f32, EngineError>;
}

/// Loads the scorer for `kind`. Blocking; run it on the blocking pool.
///
/// # Errors
///
/// Returns [`LoadError::Unavailable`] in builds without the `onnx` feature,
/// otherwise the fetch or model construction failure. For COMET-QE the error
/// of the last checkpoint tried is returned.
pub fn load_scorer(kind: MetricKind, catalog: &ModelCatalog) -> Result<Arc<dyn Scorer>, LoadError> {
    tracing::info!(metric = kind.display_name(), "loading metric");

    match kind {
        MetricKind::CometQe => first_available(&catalog.comet_qe, |checkpoint| {
            load_one(kind, checkpoint, catalog)
        }),
        MetricKind::BertScore => load_one(kind, &catalog.bertscore, catalog),
        MetricKind::Comet => load_one(kind, &catalog.comet, catalog),
        MetricKind::Bleurt => load_one(kind, &catalog.bleurt, catalog),
    }
}

/// Tries each checkpoint in order and returns the first that loads.
fn first_available<T>(
    checkpoints: &[String],
    mut load: impl FnMut(&str) -> Result<T, LoadError>,
) -> Result<T, LoadError> {
    let mut last_error = LoadError::model("no checkpoints configured");

    for checkpoint in checkpoints {
        match load(checkpoint) {
            Ok(loaded) => {
                tracing::info!(checkpoint = %checkpoint, "checkpoint loaded");
                return Ok(loaded);
            }
            Err(err) => {
                tracing::warn!(checkpoint = %checkpoint, error = %err, "checkpoint failed, trying next");
                last_error = err;
            }
        }
    }

    Err(last_error)
}

#[cfg(feature = "onnx")]
fn load_one(
    kind: MetricKind,
    checkpoint: &str,
    catalog: &ModelCatalog,
) -> Result<Arc<dyn Scorer>, LoadError> {
    crate::onnx::load_scorer(kind, checkpoint, catalog)
}

#[cfg(not(feature = "onnx"))]
fn load_one(
    kind: MetricKind,
    _checkpoint: &str,
    _catalog: &ModelCatalog,
) -> Result<Arc<dyn Scorer>, LoadError> {
    Err(LoadError::unavailable(format!(
        "{} requires the onnx feature",
        kind.display_name()
    )))
}
