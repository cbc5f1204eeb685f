//! JSON extractor with JSON rejections.

use super::error::ApiError;
use axum::extract::FromRequest;

/// Like [`axum::Json`], but a malformed body is answered with the usual
/// `{"error": ...}` payload instead of plain text.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
