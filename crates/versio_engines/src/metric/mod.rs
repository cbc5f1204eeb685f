//! Metric requests, scores and the scorer trait.
//!
//! A [`Scorer`] compares a candidate translation against a reference, a
//! source, or both, and returns a [`MetricScore`]. Which inputs a scorer reads
//! depends on its [`MetricKind`]; missing inputs are treated as empty strings.

mod error;
mod scorer;
mod types;

pub use error::MetricError;
pub use scorer::Scorer;
pub use types::{MetricKind, MetricRequest, MetricScore};
