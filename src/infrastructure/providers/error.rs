//! # Provider Errors
//!
//! Error type returned by provider adapters. The aggregation engine turns
//! every one of these into a failed [`ProviderResult`]; none escape the
//! aggregate call.
//!
//! [`ProviderResult`]: crate::domain::entities::ProviderResult
//!
//! # Examples
//!
//! ```
//! use partner_hub::domain::entities::FailureKind;
//! use partner_hub::infrastructure::providers::error::ProviderError;
//!
//! let error = ProviderError::not_found("vehicle group 42");
//! assert_eq!(error.failure_kind(), FailureKind::NotFound);
//! assert_eq!(error.http_status(), 404);
//! ```

use crate::domain::entities::FailureKind;
use crate::infrastructure::http::UpstreamError;
use thiserror::Error;

/// Error type for provider adapter operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Transport failure, non-2xx status or malformed body.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// A reference lookup found no matching entry.
    #[error("not found: {message}")]
    NotFound {
        /// What was looked up.
        message: String,
    },

    /// The request lacks the fields this provider needs.
    #[error("invalid payload: {message}")]
    InvalidPayload {
        /// What is missing or wrong.
        message: String,
    },

    /// The provider is recognised but its pricing call is not wired up.
    #[error("not implemented: {message}")]
    NotImplemented {
        /// Explanation.
        message: String,
    },

    /// Credentials for the provider are not configured.
    #[error("config missing: {message}")]
    ConfigMissing {
        /// Which settings are missing.
        message: String,
    },

    /// The provider answered but declined to price the request.
    #[error("provider rejected request: {message}")]
    Rejected {
        /// Provider message.
        message: String,
        /// Provider error code, if any.
        code: Option<String>,
    },
}

impl ProviderError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Creates an invalid payload error.
    #[must_use]
    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self::InvalidPayload {
            message: message.into(),
        }
    }

    /// Creates a not implemented error.
    #[must_use]
    pub fn not_implemented(message: impl Into<String>) -> Self {
        Self::NotImplemented {
            message: message.into(),
        }
    }

    /// Creates a config missing error.
    #[must_use]
    pub fn config_missing(message: impl Into<String>) -> Self {
        Self::ConfigMissing {
            message: message.into(),
        }
    }

    /// Creates a rejection with an optional provider error code.
    #[must_use]
    pub fn rejected(message: impl Into<String>, code: Option<String>) -> Self {
        Self::Rejected {
            message: message.into(),
            code,
        }
    }

    /// Classifies the error for the result envelope.
    #[must_use]
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Self::Upstream(e) if e.is_timeout() => FailureKind::Timeout,
            Self::Upstream(e) if e.is_parse() => FailureKind::Parse,
            Self::Upstream(_) | Self::Rejected { .. } => FailureKind::Upstream,
            Self::NotFound { .. } => FailureKind::NotFound,
            Self::InvalidPayload { .. } => FailureKind::InvalidPayload,
            Self::NotImplemented { .. } => FailureKind::NotImplemented,
            Self::ConfigMissing { .. } => FailureKind::ConfigMissing,
        }
    }

    /// Returns the effective HTTP status for this failure.
    #[must_use]
    pub fn http_status(&self) -> u16 {
        self.failure_kind().http_status()
    }

    /// Returns true if no network I/O was attempted.
    #[must_use]
    pub fn is_structural(&self) -> bool {
        self.failure_kind().is_structural()
    }

    /// Returns the provider error code, if any.
    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Rejected { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

/// Result type for provider operations.
pub type ProviderOpResult<T> = Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_errors_are_classified() {
        let timeout = ProviderError::from(UpstreamError::timeout("slow"));
        assert_eq!(timeout.failure_kind(), FailureKind::Timeout);
        assert_eq!(timeout.http_status(), 504);

        let parse = ProviderError::from(UpstreamError::parse("eof"));
        assert_eq!(parse.failure_kind(), FailureKind::Parse);

        let status = ProviderError::from(UpstreamError::status(500, "boom"));
        assert_eq!(status.failure_kind(), FailureKind::Upstream);
        assert_eq!(status.http_status(), 502);
    }

    #[test]
    fn structural_errors() {
        assert!(ProviderError::config_missing("euroasia credentials").is_structural());
        assert!(ProviderError::not_implemented("gross").is_structural());
        assert!(!ProviderError::not_found("group").is_structural());
        assert_eq!(ProviderError::invalid_payload("x").http_status(), 400);
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            ProviderError::config_missing("euroasia username/password").to_string(),
            "config missing: euroasia username/password"
        );
        let upstream = ProviderError::from(UpstreamError::status(502, "bad gateway"));
        assert_eq!(upstream.to_string(), "upstream status 502: bad gateway");
    }

    #[test]
    fn rejection_code() {
        let error = ProviderError::rejected("policy exists", Some("17".to_string()));
        assert_eq!(error.error_code(), Some("17"));
        assert_eq!(error.failure_kind(), FailureKind::Upstream);
    }
}
