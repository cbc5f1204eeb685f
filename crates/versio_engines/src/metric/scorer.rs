//! Scorer trait.

use super::types::{MetricRequest, MetricScore};
use crate::error::EngineError;

/// A loaded evaluation metric.
///
/// Scorers are created once by the engine cache and shared between requests.
/// Scoring is synchronous and CPU bound; callers run it on the blocking pool.
pub trait Scorer: Send + Sync + 'static {
    /// Scores one candidate.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] if tokenization or inference fails.
    fn score(&self, request: &MetricRequest) -> Result<MetricScore, EngineError>;
}
