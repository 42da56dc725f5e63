//! # PostgreSQL Offering Repository
//!
//! PostgreSQL implementation of [`OfferingRepository`] using sqlx.
//!
//! Each canonical offering is stored as one JSONB document. A category is
//! replaced with `DELETE` + `INSERT` inside a single transaction, so
//! concurrent readers keep seeing the previous rows until commit.

use crate::domain::entities::CanonicalOffering;
use crate::domain::value_objects::OfferingCategory;
use crate::infrastructure::persistence::traits::{
    OfferingRepository, RepositoryError, RepositoryResult, ensure_category,
};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

const CREATE_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS offerings (
    id BIGSERIAL PRIMARY KEY,
    category TEXT NOT NULL,
    position INTEGER NOT NULL,
    bank_name TEXT NOT NULL,
    payload JSONB NOT NULL,
    refreshed_at TIMESTAMPTZ NOT NULL
)";

const CREATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS offerings_category_position ON offerings (category, position)";

/// PostgreSQL implementation of [`OfferingRepository`].
///
/// # Examples
///
/// ```ignore
/// use sqlx::PgPool;
/// use partner_hub::infrastructure::persistence::postgres::PostgresOfferingRepository;
///
/// let pool = PgPool::connect("postgres://...").await?;
/// let repo = PostgresOfferingRepository::new(pool);
/// repo.ensure_schema().await?;
/// ```
#[derive(Debug, Clone)]
pub struct PostgresOfferingRepository {
    pool: PgPool,
}

impl PostgresOfferingRepository {
    /// Creates a new PostgreSQL offering repository.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the `offerings` table and its index if missing.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the DDL fails.
    pub async fn ensure_schema(&self) -> RepositoryResult<()> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        sqlx::query(CREATE_INDEX).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl OfferingRepository for PostgresOfferingRepository {
    async fn replace_category(
        &self,
        category: OfferingCategory,
        offerings: Vec<CanonicalOffering>,
    ) -> RepositoryResult<usize> {
        ensure_category(category, &offerings)?;

        let payloads = offerings
            .iter()
            .map(|o| {
                serde_json::to_string(o).map_err(|e| RepositoryError::serialization(e.to_string()))
            })
            .collect::<RepositoryResult<Vec<_>>>()?;
        let refreshed_at = Utc::now();

        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM offerings WHERE category = $1")
            .bind(category.as_str())
            .execute(&mut *tx)
            .await?;

        for (position, (offering, payload)) in offerings.iter().zip(&payloads).enumerate() {
            let position = i32::try_from(position)
                .map_err(|_| RepositoryError::query("too many offerings in one category"))?;
            sqlx::query(
                r"
                INSERT INTO offerings (category, position, bank_name, payload, refreshed_at)
                VALUES ($1, $2, $3, CAST($4 AS JSONB), $5)
                ",
            )
            .bind(category.as_str())
            .bind(position)
            .bind(&offering.bank_name)
            .bind(payload)
            .bind(refreshed_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        tracing::debug!(%category, rows = offerings.len(), "offerings replaced");
        Ok(offerings.len())
    }

    async fn find_by_category(
        &self,
        category: OfferingCategory,
    ) -> RepositoryResult<Vec<CanonicalOffering>> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r"
            SELECT payload::text
            FROM offerings
            WHERE category = $1
            ORDER BY position ASC
            ",
        )
        .bind(category.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(payload,)| {
                serde_json::from_str(&payload)
                    .map_err(|e| RepositoryError::serialization(e.to_string()))
            })
            .collect()
    }

    async fn count(&self, category: OfferingCategory) -> RepositoryResult<usize> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM offerings WHERE category = $1")
            .bind(category.as_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(usize::try_from(count).unwrap_or(0))
    }
}
