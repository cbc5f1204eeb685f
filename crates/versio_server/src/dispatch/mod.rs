//! Translation and metric dispatchers.
//!
//! Dispatchers validate a request, obtain the engine from the cache (loading
//! it on first use) and run it. Model construction and inference run on the
//! blocking pool; a panic there surfaces as an error, never as a dropped
//! connection.

mod metric;
mod translation;

pub use metric::{BatchItem, BatchRequest, BatchResponse, score, score_batch};
pub use translation::{LocalFamily, translate};

use versio_engines::EngineError;

/// Runs CPU-bound engine work on the blocking pool.
async fn run_blocking<T, F>(work: F) -> Result<T, EngineError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, EngineError> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| EngineError::Join(err.to_string()))?
}
