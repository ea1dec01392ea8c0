//! Error types for notes-core

use thiserror::Error;

/// Result type alias using notes-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for transport-level calls
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Failures surfaced by the transport client.
///
/// Repositories hand these to their callers untouched; only the state
/// holders turn them into user-facing messages.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request URL could not be built; nothing was sent
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The server answered 401; the caller should re-authenticate
    #[error("Unauthorized. Please sign in again.")]
    Unauthorized,

    /// Any non-2xx status other than 401
    #[error("HTTP {status}: {}", .body.as_deref().unwrap_or("-"))]
    BadStatus { status: u16, body: Option<String> },

    /// A 2xx body did not match the expected shape
    #[error("Failed to decode server response: {0}")]
    Decoding(#[source] serde_json::Error),

    /// The request body could not be serialized
    #[error("Failed to encode request body: {0}")]
    Encoding(#[source] serde_json::Error),

    /// DNS, connection, TLS or timeout failure
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Unknown error")]
    Unknown,
}

/// Errors that can occur in notes-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Transport client error, passed through unchanged
    #[error(transparent)]
    Api(#[from] ApiError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Secure token storage error
    #[error("Secure storage error: {0}")]
    SecureStorage(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// True when the server rejected the bearer token.
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api(ApiError::Unauthorized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_status_renders_body_or_placeholder() {
        let with_body = ApiError::BadStatus {
            status: 422,
            body: Some("title required".to_string()),
        };
        assert_eq!(with_body.to_string(), "HTTP 422: title required");

        let without_body = ApiError::BadStatus {
            status: 500,
            body: None,
        };
        assert_eq!(without_body.to_string(), "HTTP 500: -");
    }

    #[test]
    fn unauthorized_is_detected_through_core_error() {
        assert!(Error::from(ApiError::Unauthorized).is_unauthorized());
        assert!(!Error::from(ApiError::Unknown).is_unauthorized());
        assert!(!Error::InvalidInput("x".to_string()).is_unauthorized());
    }
}
