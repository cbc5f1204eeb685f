//! BLEURT: a learned regression over the (reference, candidate) pair.

use super::PairRegressor;
use versio_engines::EngineError;
use versio_engines::metric::{MetricRequest, MetricScore, Scorer};

/// BLEURT over a [`PairRegressor`].
pub struct BleurtScorer {
    regressor: Box<dyn PairRegressor>,
}

impl core::fmt::Debug for BleurtScorer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BleurtScorer").finish_non_exhaustive()
    }
}

impl BleurtScorer {
    /// Creates a scorer.
    #[must_use]
    pub fn new(regressor: Box<dyn PairRegressor>) -> Self {
        Self { regressor }
    }
}

impl Scorer for BleurtScorer {
    fn score(&self, request: &MetricRequest) -> Result<MetricScore, EngineError> {
        let score = self
            .regressor
            .regress(request.reference_or_empty(), request.candidate_or_empty())?;
        Ok(MetricScore::scalar(score))
    }
}
