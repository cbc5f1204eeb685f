//! Static frontend files.

use super::error::ApiError;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use std::io;
use std::path::{Path, PathBuf};

/// The single-page frontend.
pub const PAGE: &str = "translator.html";

/// Optional synonym dictionary loaded by the page.
pub const SYNONYMS: &str = "synonyms.js";

const SYNONYMS_STUB: &str = "// No synonyms.js";

/// Serves files from the application root.
#[derive(Debug, Clone)]
pub struct Assets {
    root: PathBuf,
}

impl Assets {
    /// Serves files under `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the asset root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Checks whether `name` exists directly under the root.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.root.join(name).is_file()
    }

    /// Serves the frontend page, or a 404 JSON error if it is missing.
    pub async fn page(&self) -> Response {
        match read(&self.root.join(PAGE)).await {
            Ok(Some(body)) => ([(CONTENT_TYPE, "text/html; charset=utf-8")], body).into_response(),
            Ok(None) => ApiError::not_found(format!("{PAGE} not found")).into_response(),
            Err(err) => {
                tracing::error!(file = PAGE, error = %err, "cannot read frontend page");
                ApiError::not_found(format!("{PAGE} not found")).into_response()
            }
        }
    }

    /// Serves the synonym script, or a comment stub with status 200.
    pub async fn synonyms(&self) -> Response {
        let body = match read(&self.root.join(SYNONYMS)).await {
            Ok(Some(body)) => body,
            Ok(None) => SYNONYMS_STUB.as_bytes().to_vec(),
            Err(err) => {
                tracing::warn!(file = SYNONYMS, error = %err, "cannot read synonyms script");
                SYNONYMS_STUB.as_bytes().to_vec()
            }
        };
        ([(CONTENT_TYPE, "text/javascript; charset=utf-8")], body).into_response()
    }
}

/// Fallback for files missing under the root.
pub(super) async fn file_not_found() -> ApiError {
    ApiError::not_found("File not found")
}

async fn read(path: &Path) -> io::Result<Option<Vec<u8>>> {
    match tokio::fs::read(path).await {
        Ok(body) => Ok(Some(body)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}
