//! JSON error responses.

use axum::extract::rejection::JsonRejection;
use core::any::Any;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use versio_engines::metric::MetricError;
use versio_engines::translate::TranslateError;

/// Error body returned by every route.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    installed_pairs: Option<Vec<String>>,
}

/// An error rendered as `{"error": message}` with a status code.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A translation failure.
    #[error(transparent)]
    Translate(#[from] TranslateError),

    /// A metric failure.
    #[error(transparent)]
    Metric(#[from] MetricError),

    /// The request body was not valid JSON for the route.
    #[error(transparent)]
    Body(#[from] JsonRejection),

    /// No such file or route.
    #[error("{0}")]
    NotFound(String),

    /// A handler panicked.
    #[error("{0}")]
    Panic(String),
}

impl ApiError {
    /// Creates a [`NotFound`](Self::NotFound) error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Creates a [`Panic`](Self::Panic) error from a panic payload.
    #[must_use]
    pub fn from_panic(payload: Box<dyn Any + Send + 'static>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(message) => *message,
            Err(payload) => payload
                .downcast_ref::<&str>()
                .map_or_else(|| "internal server error".to_string(), |s| (*s).to_string()),
        };
        Self::Panic(message)
    }

    /// Returns the response status.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        let code = match self {
            Self::Translate(err) => err.status_code(),
            Self::Metric(err) => err.status_code(),
            Self::Body(rejection) => return rejection.status(),
            Self::NotFound(_) => return StatusCode::NOT_FOUND,
            Self::Panic(_) => return StatusCode::INTERNAL_SERVER_ERROR,
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        }

        let body = ErrorBody {
            installed_pairs: match &self {
                Self::Translate(err) => err.installed_pairs().map(<[String]>::to_vec),
                _ => None,
            },
            error: match &self {
                Self::Body(rejection) => rejection.body_text(),
                other => other.to_string(),
            },
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Renders a caught handler panic as a 500 JSON error.
pub(super) fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    ApiError::from_panic(payload).into_response()
}
