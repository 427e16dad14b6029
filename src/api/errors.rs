//! Normalization of transport and server failures.
//!
//! Every adapter failure ends up as one `Error` whose display string is
//! what the user sees. Server errors always carry the status code.

use crate::error::Error;
use serde_json::Value;

/// Fallback when a transport error has no message of its own.
const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred.";

/// Map a non-success response to an error.
///
/// A structured `detail` field in a JSON body wins over the generic
/// per-status messages.
#[must_use]
pub fn from_status(status: u16, body: &str) -> Error {
    let message = server_detail(body).unwrap_or_else(|| generic_message(status).to_string());
    Error::Server { status, message }
}

/// Map a reqwest failure (no usable response) to an error.
#[must_use]
pub fn from_transport(err: &reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout
    } else if err.is_connect() || err.is_request() {
        Error::Connection
    } else {
        unexpected(err.to_string())
    }
}

/// Wrap an arbitrary failure message.
pub(crate) fn unexpected(message: String) -> Error {
    if message.trim().is_empty() {
        Error::Unexpected(UNEXPECTED_MESSAGE.to_string())
    } else {
        Error::Unexpected(message)
    }
}

/// Extract the server-supplied `detail` from a JSON error body.
fn server_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        // Validation errors arrive as arrays of objects
        other => Some(other.to_string()),
    }
}

fn generic_message(status: u16) -> &'static str {
    match status {
        500..=u16::MAX => "Internal server error. Please try again later.",
        404 => "Resource not found.",
        400 => "Invalid request. Please check your input.",
        _ => "Server error occurred",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_string_is_used_verbatim() {
        let err = from_status(500, r#"{"detail": "Database error"}"#);
        assert_eq!(err.to_string(), "Database error (500)");
    }

    #[test]
    fn structured_detail_is_rendered_as_json() {
        let err = from_status(422, r#"{"detail": [{"loc": ["body", "query"], "msg": "field required"}]}"#);
        let message = err.to_string();
        assert!(message.contains("field required"));
        assert!(message.ends_with("(422)"));
    }

    #[test]
    fn server_errors_without_detail() {
        assert_eq!(
            from_status(503, "").to_string(),
            "Internal server error. Please try again later. (503)"
        );
        assert_eq!(
            from_status(500, "<html>oops</html>").to_string(),
            "Internal server error. Please try again later. (500)"
        );
    }

    #[test]
    fn client_errors_without_detail() {
        assert_eq!(from_status(404, "{}").to_string(), "Resource not found. (404)");
        assert_eq!(
            from_status(400, r#"{"detail": null}"#).to_string(),
            "Invalid request. Please check your input. (400)"
        );
        assert_eq!(from_status(409, "").to_string(), "Server error occurred (409)");
    }

    #[test]
    fn empty_detail_falls_back_to_generic() {
        let err = from_status(404, r#"{"detail": ""}"#);
        assert_eq!(err.to_string(), "Resource not found. (404)");
    }

    #[test]
    fn status_is_always_recorded() {
        for status in [400, 401, 404, 418, 500, 502] {
            assert_eq!(from_status(status, "").status(), Some(status));
        }
    }

    #[test]
    fn empty_unexpected_message_gets_fallback() {
        assert_eq!(unexpected(String::new()).to_string(), UNEXPECTED_MESSAGE);
        assert_eq!(unexpected("boom".to_string()).to_string(), "boom");
    }
}
