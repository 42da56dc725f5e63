//! # In-Memory Offering Repository
//!
//! In-memory implementation of [`OfferingRepository`] used when no database
//! URL is configured and in tests.

use crate::domain::entities::CanonicalOffering;
use crate::domain::value_objects::OfferingCategory;
use crate::infrastructure::persistence::traits::{
    OfferingRepository, RepositoryResult, ensure_category,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`OfferingRepository`].
///
/// A category is swapped by replacing its whole vector under one write lock.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOfferingRepository {
    storage: Arc<RwLock<HashMap<OfferingCategory, Vec<CanonicalOffering>>>>,
}

impl InMemoryOfferingRepository {
    /// Creates a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of offerings across all categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage
            .try_read()
            .map(|guard| guard.values().map(Vec::len).sum())
            .unwrap_or(0)
    }

    /// Returns true if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl OfferingRepository for InMemoryOfferingRepository {
    async fn replace_category(
        &self,
        category: OfferingCategory,
        offerings: Vec<CanonicalOffering>,
    ) -> RepositoryResult<usize> {
        ensure_category(category, &offerings)?;
        let stored = offerings.len();
        let mut storage = self.storage.write().await;
        storage.insert(category, offerings);
        Ok(stored)
    }

    async fn find_by_category(
        &self,
        category: OfferingCategory,
    ) -> RepositoryResult<Vec<CanonicalOffering>> {
        let storage = self.storage.read().await;
        Ok(storage.get(&category).cloned().unwrap_or_default())
    }
}
