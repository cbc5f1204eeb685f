//! Metric dispatch.

use super::run_blocking;
use crate::context::Engines;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use versio_engines::metric::{MetricError, MetricKind, MetricRequest, MetricScore};

/// Scores one candidate with the metric `kind`, loading the scorer on first
/// use.
///
/// # Errors
///
/// Returns [`MetricError::Unavailable`] if the scorer cannot be loaded, or
/// [`MetricError::Engine`] if scoring fails.
pub async fn score(
    engines: &Engines,
    kind: MetricKind,
    request: MetricRequest,
) -> Result<MetricScore, MetricError> {
    let loader = Arc::clone(&engines.loader);
    let scorer = engines
        .scorers
        .get_or_load_blocking(kind.id(), move || loader.scorer(kind))
        .await
        .map_err(|err| {
            tracing::warn!(metric = kind.id(), error = %err, "metric load failed");
            MetricError::Unavailable(kind)
        })?;

    let score = run_blocking(move || scorer.score(&request)).await?;
    tracing::debug!(metric = kind.id(), score = score.headline(), "scored");
    Ok(score)
}

/// A batch of candidates scored with several metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchRequest {
    /// Items to score.
    #[serde(default)]
    pub pairs: Vec<MetricRequest>,
    /// Metric names, e.g. `bertscore` or `comet-qe`.
    #[serde(default)]
    pub metrics: Vec<String>,
}

/// One metric outcome within a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BatchItem {
    /// The metric succeeded.
    Score(MetricScore),
    /// The metric failed for this item.
    Error {
        /// The failure message.
        error: String,
    },
}

/// Batch results, one map per input pair keyed by metric name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchResponse {
    /// Per-pair outcomes, in input order.
    pub results: Vec<BTreeMap<String, BatchItem>>,
}

/// Scores every pair with every requested metric.
///
/// Failures are reported per item; the batch itself always succeeds.
/// Unknown metric names yield an error entry under the name as given.
pub async fn score_batch(engines: &Engines, batch: BatchRequest) -> BatchResponse {
    let metrics: Vec<(String, Option<MetricKind>)> = batch
        .metrics
        .iter()
        .map(|name| match MetricKind::from_name(name) {
            Some(kind) => (kind.id().to_string(), Some(kind)),
            None => (name.clone(), None),
        })
        .collect();

    tracing::debug!(
        pairs = batch.pairs.len(),
        metrics = metrics.len(),
        "scoring batch"
    );

    let mut results = Vec::with_capacity(batch.pairs.len());
    for pair in batch.pairs {
        let mut outcomes = BTreeMap::new();
        for (name, kind) in &metrics {
            let outcome = match kind {
                Some(kind) => score(engines, *kind, pair.clone()).await,
                None => Err(MetricError::UnknownMetric(name.clone())),
            };
            let item = match outcome {
                Ok(score) => BatchItem::Score(score),
                Err(err) => BatchItem::Error {
                    error: err.to_string(),
                },
            };
            outcomes.insert(name.clone(), item);
        }
        results.push(outcomes);
    }

    BatchResponse { results }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn batch_items_serialize_flat() {
        let response = BatchResponse {
            results: vec![BTreeMap::from([
                (
                    "bleurt".to_string(),
                    BatchItem::Score(MetricScore::scalar(0.5)),
                ),
                (
                    "comet".to_string(),
                    BatchItem::Error {
                        error: "COMET not available".to_string(),
                    },
                ),
            ])],
        };

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"results": [{
                "bleurt": {"score": 0.5},
                "comet": {"error": "COMET not available"}
            }]})
        );
    }

    #[test]
    fn batch_request_fields_default() {
        let batch: BatchRequest = serde_json::from_value(json!({})).unwrap();
        assert!(batch.pairs.is_empty());
        assert!(batch.metrics.is_empty());
    }
}
