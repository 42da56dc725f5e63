//! # Upstream Errors
//!
//! Errors raised while talking to partner HTTP APIs.
//!
//! # Examples
//!
//! ```
//! use partner_hub::infrastructure::http::error::UpstreamError;
//!
//! let error = UpstreamError::timeout("request timed out");
//! assert!(error.is_retryable());
//!
//! let error = UpstreamError::status(502, "bad gateway");
//! assert_eq!(error.http_status(), Some(502));
//! ```

use thiserror::Error;

/// Error type for outbound HTTP calls.
///
/// Carries the upstream status and body when the partner answered with a
/// non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    /// Request timed out.
    #[error("upstream timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
        /// Timeout duration in milliseconds.
        timeout_ms: Option<u64>,
    },

    /// Network or connection error.
    #[error("upstream connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// Partner rejected the credentials.
    #[error("upstream authentication error ({status}): {message}")]
    Authentication {
        /// HTTP status returned by the partner.
        status: u16,
        /// Error message.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("upstream rate limit exceeded: {message}")]
    RateLimited {
        /// Error message.
        message: String,
    },

    /// Any other non-2xx response.
    #[error("upstream status {status}: {body}")]
    Status {
        /// HTTP status returned by the partner.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// Response body is not the expected JSON.
    #[error("upstream response parse error: {message}")]
    Parse {
        /// Error message.
        message: String,
    },

    /// Client construction or request building failed locally.
    #[error("http client error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl UpstreamError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: None,
        }
    }

    /// Creates a timeout error with duration.
    #[must_use]
    pub fn timeout_with_duration(message: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: Some(timeout_ms),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates an authentication error.
    #[must_use]
    pub fn authentication(status: u16, message: impl Into<String>) -> Self {
        Self::Authentication {
            status,
            message: message.into(),
        }
    }

    /// Creates a rate limited error.
    #[must_use]
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited {
            message: message.into(),
        }
    }

    /// Creates a status error.
    #[must_use]
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this error is transient.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Connection { .. } | Self::RateLimited { .. } => true,
            Self::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns true if the response body could not be parsed.
    #[must_use]
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Returns true if the call timed out.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns the upstream HTTP status, if the partner answered.
    #[must_use]
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. } | Self::Status { status, .. } => Some(*status),
            Self::RateLimited { .. } => Some(429),
            _ => None,
        }
    }
}

/// Result type for outbound HTTP calls.
pub type UpstreamResult<T> = Result<T, UpstreamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_errors_are_retryable() {
        assert!(UpstreamError::timeout("t").is_retryable());
        assert!(UpstreamError::connection("c").is_retryable());
        assert!(UpstreamError::rate_limited("r").is_retryable());
        assert!(UpstreamError::status(503, "").is_retryable());
    }

    #[test]
    fn client_side_errors_are_not_retryable() {
        assert!(!UpstreamError::authentication(401, "bad key").is_retryable());
        assert!(!UpstreamError::status(400, "bad").is_retryable());
        assert!(!UpstreamError::parse("eof").is_retryable());
    }

    #[test]
    fn status_is_exposed() {
        assert_eq!(UpstreamError::status(502, "").http_status(), Some(502));
        assert_eq!(UpstreamError::authentication(403, "").http_status(), Some(403));
        assert_eq!(UpstreamError::timeout("t").http_status(), None);
    }

    #[test]
    fn display_includes_status_and_body() {
        let display = UpstreamError::status(502, "gateway down").to_string();
        assert!(display.contains("502"));
        assert!(display.contains("gateway down"));
    }
}
