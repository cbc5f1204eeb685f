//! Helpers shared by the remote API clients.

use serde::Deserialize;
use versio_engines::translate::TranslateError;

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorBody>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Builds the error for a non-success response whose body may carry
/// `{"error": {"message": ...}}`.
///
/// Falls back to `API error {status}` when the body has no message.
pub(crate) fn upstream_error(status: reqwest::StatusCode, body: &str) -> TranslateError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
        .and_then(|error| error.message)
        .unwrap_or_else(|| format!("API error {}", status.as_u16()));

    TranslateError::Upstream {
        status: status.as_u16(),
        message,
    }
}

/// Maps a transport failure to [`TranslateError::Http`].
pub(crate) fn transport_error(err: &reqwest::Error) -> TranslateError {
    if err.is_timeout() {
        TranslateError::Http(format!("request timed out: {err}"))
    } else {
        TranslateError::Http(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn extracts_nested_message() {
        let err = upstream_error(
            StatusCode::UNAUTHORIZED,
            r#"{"type":"error","error":{"type":"authentication_error","message":"invalid x-api-key"}}"#,
        );
        assert_eq!(err.status_code(), 401);
        assert_eq!(err.to_string(), "invalid x-api-key");
    }

    #[test]
    fn falls_back_to_status_text() {
        let err = upstream_error(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        assert_eq!(err.status_code(), 502);
        assert_eq!(err.to_string(), "API error 502");

        let err = upstream_error(StatusCode::TOO_MANY_REQUESTS, r#"{"error":{}}"#);
        assert_eq!(err.to_string(), "API error 429");
    }
}
