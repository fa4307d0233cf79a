//! Error types for the ballchasing client library.

use thiserror::Error;

/// The main error type for all ballchasing client operations.
#[derive(Error, Debug)]
pub enum BallchasingError {
    /// Malformed caller input, detected before any network activity
    #[error("invalid input: {0}")]
    Validation(String),

    /// The request does not target a supported endpoint family
    #[error("unsupported endpoint: {0}")]
    Configuration(String),

    /// A non-transient HTTP status, or an identity probe failure
    #[error("connection error: status code {status}")]
    Connection {
        /// The HTTP status code returned by the API
        status: u16,
    },

    /// Ten consecutive 429/500 responses within one session
    #[error("gave up after 10 consecutive failures, last status code {status}")]
    RateServer {
        /// The HTTP status code of the final failed attempt
        status: u16,
    },

    /// A sub-window result was truncated or exceeded the provider's hard cap
    #[error("response overflow: {0}")]
    ResponseOverflow(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Timestamp formatting error
    #[error("time formatting error: {0}")]
    TimeFormat(#[from] time::error::Format),

    /// Writing to an identifier sink failed
    #[error("sink I/O error: {0}")]
    Sink(#[from] std::io::Error),
}

impl BallchasingError {
    /// Check if this error signals that a finer fetch resolution is required.
    pub fn is_overflow(&self) -> bool {
        matches!(self, BallchasingError::ResponseOverflow(_))
    }

    /// Check if this error was raised after exhausting the retry budget.
    pub fn is_rate_server(&self) -> bool {
        matches!(self, BallchasingError::RateServer { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_server_display_names_ceiling() {
        let error = BallchasingError::RateServer { status: 429 };
        assert_eq!(
            error.to_string(),
            "gave up after 10 consecutive failures, last status code 429"
        );
        assert!(error.is_rate_server());
    }

    #[test]
    fn test_overflow_predicate() {
        let error = BallchasingError::ResponseOverflow("window too coarse".to_string());
        assert!(error.is_overflow());
        assert!(!error.is_rate_server());
    }
}
