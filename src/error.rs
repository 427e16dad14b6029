//! Error types for scout.
//!
//! Adapter failures are normalized into one of the request kinds below;
//! their `Display` output is the message shown to the user.

use std::io;
use thiserror::Error;

/// Result type alias for scout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in scout operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Input rejected before any network call.
    #[error("{0}")]
    Validation(String),

    /// The transport exceeded its deadline.
    #[error("Request timed out. The server might be overloaded.")]
    Timeout,

    /// No response could be obtained from the server.
    #[error("Cannot connect to server. Please check if the server is running.")]
    Connection,

    /// The server answered with a non-success status.
    #[error("{message} ({status})")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Server-supplied detail or a generic message for the status.
        message: String,
    },

    /// Anything the other kinds do not cover.
    #[error("{0}")]
    Unexpected(String),

    /// Named user not present in the local directory.
    #[error("User not found: {0}")]
    UserNotFound(u64),

    /// Local storage I/O error.
    #[error("Storage error: {0}")]
    Storage(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Status code carried by a server error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for errors raised before a request was sent.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_includes_status() {
        let err = Error::Server {
            status: 404,
            message: "Resource not found.".to_string(),
        };
        assert_eq!(err.to_string(), "Resource not found. (404)");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn request_kinds_have_fixed_messages() {
        assert!(Error::Timeout.to_string().starts_with("Request timed out"));
        assert!(Error::Connection.to_string().starts_with("Cannot connect"));
        assert_eq!(Error::Timeout.status(), None);
    }

    #[test]
    fn validation_message_is_verbatim() {
        let err = Error::Validation("Please enter a research query.".to_string());
        assert_eq!(err.to_string(), "Please enter a research query.");
        assert!(err.is_validation());
        assert!(!Error::Connection.is_validation());
    }
}
