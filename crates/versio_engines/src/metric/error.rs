//! Metric dispatcher errors.

use super::types::MetricKind;
use crate::error::EngineError;

/// Errors returned by the metric dispatcher.
#[derive(Debug, thiserror::Error)]
pub enum MetricError {
    /// The scorer could not be loaded.
    #[error("{} not available", .0.display_name())]
    Unavailable(MetricKind),

    /// Scoring failed inside a loaded scorer.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The requested metric name is not known.
    #[error("unknown metric: {0}")]
    UnknownMetric(String),
}

impl MetricError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::UnknownMetric(_) => 400,
            Self::Unavailable(_) | Self::Engine(_) => 500,
        }
    }
}
