//! Model file download through the Hugging Face hub.

use hf_hub::api::sync::ApiBuilder;
use std::path::{Path, PathBuf};
use versio_engines::LoadError;

/// Downloads `files` from `repo` into `cache_dir`, reusing cached copies.
pub(crate) fn fetch(repo: &str, files: &[&str], cache_dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    tracing::info!(repo, cache_dir = %cache_dir.display(), "resolving model files via hf-hub");

    let api = ApiBuilder::new()
        .with_cache_dir(cache_dir.to_path_buf())
        .with_progress(false)
        .build()
        .map_err(|err| LoadError::fetch(format!("hf-hub init failed: {err}")))?;
    let repository = api.model(repo.to_string());

    files
        .iter()
        .map(|file| {
            repository
                .get(file)
                .map_err(|err| LoadError::fetch(format!("{repo}/{file}: {err}")))
        })
        .collect()
}
