//! # Repository Traits
//!
//! Port for the serving store of canonical offerings.
//!
//! A refresh replaces every offering of one category at once, so readers
//! see either the previous set or the new one, never a partially written
//! table.
//!
//! # Examples
//!
//! ```ignore
//! use partner_hub::infrastructure::persistence::traits::OfferingRepository;
//!
//! async fn show_deposits(repo: &impl OfferingRepository) {
//!     let deposits = repo.find_by_category(OfferingCategory::Deposit).await?;
//!     println!("{} deposits", deposits.len());
//! }
//! ```

use crate::domain::entities::CanonicalOffering;
use crate::domain::value_objects::OfferingCategory;
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A record does not belong to the category being replaced.
    #[error("category mismatch: expected {expected}, got {actual}")]
    CategoryMismatch {
        /// Category being replaced.
        expected: OfferingCategory,
        /// Category of the offending record.
        actual: OfferingCategory,
    },

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query error.
    #[error("Query error: {0}")]
    Query(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepositoryError {
    /// Creates a category mismatch error.
    #[must_use]
    pub fn category_mismatch(expected: OfferingCategory, actual: OfferingCategory) -> Self {
        Self::CategoryMismatch { expected, actual }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error.
    #[must_use]
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }
}

impl From<sqlx::Error> for RepositoryError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::connection(error.to_string())
            }
            other => Self::query(other.to_string()),
        }
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Checks that every offering belongs to `category`.
///
/// # Errors
///
/// Returns `RepositoryError::CategoryMismatch` for the first stray record.
pub fn ensure_category(
    category: OfferingCategory,
    offerings: &[CanonicalOffering],
) -> RepositoryResult<()> {
    match offerings.iter().find(|o| o.category != category) {
        Some(stray) => Err(RepositoryError::category_mismatch(category, stray.category)),
        None => Ok(()),
    }
}

/// Serving store for canonical offerings.
#[async_trait]
pub trait OfferingRepository: Send + Sync + fmt::Debug {
    /// Atomically replaces all offerings of `category` with `offerings`.
    ///
    /// Returns the number of stored offerings.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::CategoryMismatch` if a record has another
    /// category, or a storage error; on error the previous set is kept.
    async fn replace_category(
        &self,
        category: OfferingCategory,
        offerings: Vec<CanonicalOffering>,
    ) -> RepositoryResult<usize>;

    /// Returns the offerings of `category` in stored order.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    async fn find_by_category(
        &self,
        category: OfferingCategory,
    ) -> RepositoryResult<Vec<CanonicalOffering>>;

    /// Returns the number of offerings of `category`.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    async fn count(&self, category: OfferingCategory) -> RepositoryResult<usize> {
        Ok(self.find_by_category(category).await?.len())
    }
}
