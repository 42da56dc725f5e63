//! # Application Errors
//!
//! Error types for the application layer.
//!
//! Provider and translation failures never appear here: the aggregation
//! engine turns provider errors into per-provider results and the
//! translation pipeline swallows backend errors. What remains are request
//! validation, lookups and storage failures.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── Domain(DomainError)                  - Entity validation (400)
//! ├── Infrastructure(InfrastructureError)  - Store / feed failures (502, 503)
//! ├── Validation(String)                   - Request validation (400)
//! ├── NotFound { resource_type, id }       - Unknown resource (404)
//! ├── Unavailable(String)                  - Component not configured (503)
//! └── Internal(String)                     - Anything else (500)
//! ```
//!
//! # Examples
//!
//! ```
//! use partner_hub::application::error::{ApplicationError, InfrastructureError};
//!
//! let err = ApplicationError::not_found("provider", "allianz");
//! assert_eq!(err.status_code(), 404);
//!
//! let err: ApplicationError = InfrastructureError::feed("connection refused").into();
//! assert_eq!(err.status_code(), 502);
//! ```

use crate::domain::errors::DomainError;
use crate::infrastructure::http::UpstreamError;
use crate::infrastructure::persistence::RepositoryError;
use thiserror::Error;

/// Infrastructure layer error.
#[derive(Debug, Error)]
pub enum InfrastructureError {
    /// Repository error.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Offering feed error.
    #[error("feed error: {0}")]
    Feed(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl InfrastructureError {
    /// Creates a feed error.
    #[must_use]
    pub fn feed(message: impl Into<String>) -> Self {
        Self::Feed(message.into())
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

impl From<UpstreamError> for InfrastructureError {
    fn from(error: UpstreamError) -> Self {
        Self::Feed(error.to_string())
    }
}

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain error from entity validation.
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Infrastructure error from external systems.
    #[error("infrastructure error: {0}")]
    Infrastructure(#[from] InfrastructureError),

    /// Request validation failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("not found: {resource_type} {id}")]
    NotFound {
        /// Type of resource.
        resource_type: String,
        /// Resource identifier.
        id: String,
    },

    /// A component needed by the operation is not configured.
    #[error("unavailable: {0}")]
    Unavailable(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }

    /// Creates an unavailable error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Domain(_))
    }

    /// HTTP status for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(_) | Self::Validation(_) => 400,
            Self::NotFound { .. } => 404,
            Self::Infrastructure(InfrastructureError::Configuration(_)) | Self::Unavailable(_) => {
                503
            }
            Self::Infrastructure(_) => 502,
            Self::Internal(_) => 500,
        }
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Domain(_) | Self::Validation(_) => "validation_error",
            Self::NotFound { .. } => "not_found",
            Self::Infrastructure(InfrastructureError::Repository(_)) => "repository_error",
            Self::Infrastructure(InfrastructureError::Feed(_)) => "feed_error",
            Self::Infrastructure(InfrastructureError::Configuration(_)) => "configuration_error",
            Self::Unavailable(_) => "unavailable",
            Self::Internal(_) => "internal_error",
        }
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_are_validation_failures() {
        let err: ApplicationError = DomainError::MissingField("vehicle.gov_number").into();
        assert!(err.is_validation());
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "validation_error");
        assert_eq!(err.to_string(), "missing required field: vehicle.gov_number");
    }

    #[test]
    fn not_found() {
        let err = ApplicationError::not_found("provider", "allianz");
        assert!(err.is_not_found());
        assert_eq!(err.status_code(), 404);
        assert!(err.to_string().contains("allianz"));
    }

    #[test]
    fn infrastructure_statuses() {
        let repo: ApplicationError =
            InfrastructureError::from(RepositoryError::query("syntax error")).into();
        assert_eq!(repo.status_code(), 502);
        assert_eq!(repo.error_code(), "repository_error");

        let feed: ApplicationError = InfrastructureError::from(UpstreamError::status(500, "")).into();
        assert_eq!(feed.error_code(), "feed_error");

        let config: ApplicationError = InfrastructureError::configuration("no feed url").into();
        assert_eq!(config.status_code(), 503);
    }

    #[test]
    fn unavailable_and_internal() {
        assert_eq!(ApplicationError::unavailable("feed").status_code(), 503);
        assert_eq!(ApplicationError::internal("boom").status_code(), 500);
        assert!(!ApplicationError::internal("boom").is_validation());
    }
}
