//! BERTScore: greedy matching of contextual token embeddings.

use super::pooling::cosine;
use super::TokenEmbedder;
use versio_engines::EngineError;
use versio_engines::metric::{MetricRequest, MetricScore, Scorer};

/// BERTScore over a [`TokenEmbedder`].
///
/// Each candidate token is matched to its most similar reference token
/// (precision) and each reference token to its most similar candidate token
/// (recall). The three values are then rescaled with `(x - b) / (1 - b)` so
/// that unrelated sentences score near zero.
pub struct BertScorer {
    embedder: Box<dyn TokenEmbedder>,
    baseline: f32,
}

impl core::fmt::Debug for BertScorer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BertScorer")
            .field("baseline", &self.baseline)
            .finish_non_exhaustive()
    }
}

impl BertScorer {
    /// Creates a scorer rescaling with `baseline`.
    #[must_use]
    pub fn new(embedder: Box<dyn TokenEmbedder>, baseline: f32) -> Self {
        Self { embedder, baseline }
    }

    fn rescale(&self, value: f32) -> f32 {
        (value - self.baseline) / (1.0 - self.baseline)
    }
}

impl Scorer for BertScorer {
    fn score(&self, request: &MetricRequest) -> Result<MetricScore, EngineError> {
        let candidate = self.embedder.embed_tokens(request.candidate_or_empty())?;
        let reference = self.embedder.embed_tokens(request.reference_or_empty())?;

        let (precision, recall, f1) = greedy_match(&candidate, &reference);
        Ok(MetricScore::Prf {
            precision: self.rescale(precision),
            recall: self.rescale(recall),
            f1: self.rescale(f1),
        })
    }
}

/// Returns raw precision, recall and F1 of greedy cosine matching.
///
/// Empty inputs score zero.
#[must_use]
pub fn greedy_match(candidate: &[Vec<f32>], reference: &[Vec<f32>]) -> (f32, f32, f32) {
    if candidate.is_empty() || reference.is_empty() {
        return (0.0, 0.0, 0.0);
    }

    let best = |from: &[Vec<f32>], to: &[Vec<f32>]| -> f32 {
        let total: f32 = from
            .iter()
            .map(|a| {
                to.iter()
                    .map(|b| cosine(a, b))
                    .fold(f32::NEG_INFINITY, f32::max)
            })
            .sum();
        let count = from.len() as f32;
        total / count
    };

    let precision = best(candidate, reference);
    let recall = best(reference, candidate);
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };
    (precision, recall, f1)
}
