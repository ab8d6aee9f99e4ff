//! Error types for the client.

use thiserror::Error;

/// Client error type.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport failed (connection, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON serialization/deserialization error, for either layer of the envelope.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server answered with a non-2xx status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the server, or the raw body.
        message: String,
        /// Machine-readable error code, when the server sent one.
        code: Option<String>,
    },

    /// Tool result envelope did not carry `content[0].text`.
    #[error("Malformed tool result: {0}")]
    MalformedEnvelope(String),

    /// Tool result was flagged with `isError`.
    #[error("Tool error: {0}")]
    Tool(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// How a non-2xx response should be treated by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFailure {
    /// 401: the bearer token was missing or rejected.
    Unauthorized,
    /// 403: the token is valid but lacks access.
    Forbidden,
    /// 429: the server is rate limiting this client.
    RateLimited,
    /// Any other non-2xx status.
    Other(u16),
}

impl ApiFailure {
    /// Classify an HTTP status code.
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            429 => Self::RateLimited,
            other => Self::Other(other),
        }
    }

    /// Operator-facing hint for this failure, if there is a useful one.
    #[must_use]
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Unauthorized => Some("Authentication failed - check your token"),
            Self::Forbidden => Some("Permission denied - insufficient access"),
            Self::RateLimited => Some("Rate limit exceeded - try again later"),
            Self::Other(_) => None,
        }
    }
}

impl Error {
    /// HTTP status carried by this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Status classification for callers that branch on 401/403/429.
    #[must_use]
    pub fn failure(&self) -> Option<ApiFailure> {
        self.status().map(ApiFailure::from_status)
    }
}
