//! Metric request and score types.

use serde::{Deserialize, Serialize};

/// The evaluation metrics Versio can compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Embedding similarity against a reference.
    #[serde(rename = "bertscore")]
    BertScore,
    /// Learned estimator over source, candidate and reference.
    Comet,
    /// Reference-free learned estimator over source and candidate.
    CometQe,
    /// Learned regression over reference and candidate.
    Bleurt,
}

impl MetricKind {
    /// Every metric, in display order.
    pub const ALL: [Self; 4] = [Self::BertScore, Self::Comet, Self::CometQe, Self::Bleurt];

    /// Returns the cache identifier and JSON key of the metric.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::BertScore => "bertscore",
            Self::Comet => "comet",
            Self::CometQe => "comet_qe",
            Self::Bleurt => "bleurt",
        }
    }

    /// Returns the human-readable metric name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::BertScore => "BERTScore",
            Self::Comet => "COMET",
            Self::CometQe => "COMET-QE",
            Self::Bleurt => "BLEURT",
        }
    }

    /// Parses a metric name as used in routes and batch requests.
    ///
    /// Accepts both `comet_qe` and `comet-qe`, case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().replace('-', "_").as_str() {
            "bertscore" => Some(Self::BertScore),
            "comet" => Some(Self::Comet),
            "comet_qe" => Some(Self::CometQe),
            "bleurt" => Some(Self::Bleurt),
            _ => None,
        }
    }
}

impl core::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.id())
    }
}

/// Inputs to a metric. Absent or `null` fields are scored as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricRequest {
    /// The translation being evaluated.
    #[serde(default)]
    pub candidate: Option<String>,
    /// Human reference translation.
    #[serde(default)]
    pub reference: Option<String>,
    /// Source text.
    #[serde(default)]
    pub source: Option<String>,
}

impl MetricRequest {
    /// Creates a request for `candidate` with no reference or source.
    #[must_use]
    pub fn new(candidate: impl Into<String>) -> Self {
        Self {
            candidate: Some(candidate.into()),
            ..Self::default()
        }
    }

    /// Sets the reference translation.
    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Sets the source text.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the candidate, or `""` if absent.
    #[must_use]
    pub fn candidate_or_empty(&self) -> &str {
        self.candidate.as_deref().unwrap_or_default()
    }

    /// Returns the reference, or `""` if absent.
    #[must_use]
    pub fn reference_or_empty(&self) -> &str {
        self.reference.as_deref().unwrap_or_default()
    }

    /// Returns the source, or `""` if absent.
    #[must_use]
    pub fn source_or_empty(&self) -> &str {
        self.source.as_deref().unwrap_or_default()
    }
}

/// A metric result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricScore {
    /// Precision, recall and F1, reported by BERTScore.
    Prf {
        /// Candidate tokens matched in the reference.
        precision: f32,
        /// Reference tokens matched in the candidate.
        recall: f32,
        /// Harmonic mean of precision and recall.
        f1: f32,
    },
    /// A single scalar.
    Scalar {
        /// The score.
        score: f32,
    },
}

impl MetricScore {
    /// Creates a [`Scalar`](Self::Scalar) score.
    #[must_use]
    pub fn scalar(score: f32) -> Self {
        Self::Scalar { score }
    }

    /// Returns the headline number: F1 or the scalar.
    #[must_use]
    pub fn headline(&self) -> f32 {
        match *self {
            Self::Prf { f1, .. } => f1,
            Self::Scalar { score } => score,
        }
    }
}
