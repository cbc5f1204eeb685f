//! COMET and COMET-QE: learned estimators over sentence embeddings.

use super::{Estimator, PairEncoder, SentenceEncoder};
use versio_engines::EngineError;
use versio_engines::metric::{MetricRequest, MetricScore, Scorer};

/// Builds the reference-based COMET feature vector
/// `[mt, ref, mt*ref, |mt-ref|, mt*src, |mt-src|]`.
#[must_use]
pub fn comet_features(src: &[f32], mt: &[f32], reference: &[f32]) -> Vec<f32> {
    let mut features = Vec::with_capacity(mt.len() * 6);
    features.extend_from_slice(mt);
    features.extend_from_slice(reference);
    features.extend(mt.iter().zip(reference).map(|(m, r)| m * r));
    features.extend(mt.iter().zip(reference).map(|(m, r)| (m - r).abs()));
    features.extend(mt.iter().zip(src).map(|(m, s)| m * s));
    features.extend(mt.iter().zip(src).map(|(m, s)| (m - s).abs()));
    features
}

/// Builds the reference-free feature vector `[mt, src, mt*src, |mt-src|]`.
#[must_use]
pub fn qe_features(src: &[f32], mt: &[f32]) -> Vec<f32> {
    let mut features = Vec::with_capacity(mt.len() * 4);
    features.extend_from_slice(mt);
    features.extend_from_slice(src);
    features.extend(mt.iter().zip(src).map(|(m, s)| m * s));
    features.extend(mt.iter().zip(src).map(|(m, s)| (m - s).abs()));
    features
}

/// Reference-based COMET.
pub struct CometScorer {
    encoder: Box<dyn SentenceEncoder>,
    estimator: Box<dyn Estimator>,
}

impl core::fmt::Debug for CometScorer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CometScorer").finish_non_exhaustive()
    }
}

impl CometScorer {
    /// Creates a scorer.
    #[must_use]
    pub fn new(encoder: Box<dyn SentenceEncoder>, estimator: Box<dyn Estimator>) -> Self {
        Self { encoder, estimator }
    }
}

impl Scorer for CometScorer {
    fn score(&self, request: &MetricRequest) -> Result<MetricScore, EngineError> {
        let src = self.encoder.encode(request.source_or_empty())?;
        let mt = self.encoder.encode(request.candidate_or_empty())?;
        let reference = self.encoder.encode(request.reference_or_empty())?;

        let features = comet_features(&src, &mt, &reference);
        Ok(MetricScore::scalar(self.estimator.estimate(&features)?))
    }
}

/// Reference-free COMET, in either of its two checkpoint styles.
pub enum CometQeScorer {
    /// Candidate and source encoded together; the leading token feeds the
    /// estimator.
    Joint {
        /// Pair encoder.
        encoder: Box<dyn PairEncoder>,
        /// Regression head.
        estimator: Box<dyn Estimator>,
    },
    /// Candidate and source encoded separately and combined with
    /// [`qe_features`].
    Split {
        /// Sentence encoder.
        encoder: Box<dyn SentenceEncoder>,
        /// Regression head.
        estimator: Box<dyn Estimator>,
    },
}

impl core::fmt::Debug for CometQeScorer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let style = match self {
            Self::Joint { .. } => "joint",
            Self::Split { .. } => "split",
        };
        f.debug_struct("CometQeScorer")
            .field("style", &style)
            .finish_non_exhaustive()
    }
}

impl Scorer for CometQeScorer {
    fn score(&self, request: &MetricRequest) -> Result<MetricScore, EngineError> {
        let source = request.source_or_empty();
        let score = match self {
            Self::Joint { encoder, estimator } => {
                let pooled = encoder.encode_pair(request.candidate_or_empty(), source)?;
                estimator.estimate(&pooled)?
            }
            Self::Split { encoder, estimator } => {
                let mt = encoder.encode(request.candidate_or_empty())?;
                let src = encoder.encode(source)?;
                estimator.estimate(&qe_features(&src, &mt))?
            }
        };
        Ok(MetricScore::scalar(score))
    }
}
