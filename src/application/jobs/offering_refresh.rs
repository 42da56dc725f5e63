//! # Offering Refresh Job
//!
//! Periodically pulls raw offerings from the partner feed, normalizes them
//! and swaps them into the serving store one category at a time.
//!
//! Runs never overlap: a run that finds the job lock held is skipped. A
//! fetch that yields nothing never truncates the serving data.

use crate::application::error::{ApplicationResult, InfrastructureError};
use crate::application::services::offering_normalizer::OfferingNormalization;
use crate::domain::value_objects::OfferingCategory;
use crate::infrastructure::feeds::OfferingSource;
use crate::infrastructure::persistence::OfferingRepository;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// What one run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    /// Another run held the lock.
    Skipped,
    /// Nothing to store; the serving data was left untouched.
    Empty {
        /// Records fetched before filtering.
        fetched: usize,
    },
    /// The category was replaced.
    Refreshed {
        /// Records fetched.
        fetched: usize,
        /// Records stored after normalization and filtering.
        stored: usize,
    },
}

/// Fetch, normalize and swap job.
#[derive(Debug)]
pub struct OfferingRefreshJob {
    source: Arc<dyn OfferingSource>,
    normalizer: Arc<dyn OfferingNormalization>,
    repository: Arc<dyn OfferingRepository>,
    lock: Mutex<()>,
}

impl OfferingRefreshJob {
    /// Creates a job.
    #[must_use]
    pub fn new(
        source: Arc<dyn OfferingSource>,
        normalizer: Arc<dyn OfferingNormalization>,
        repository: Arc<dyn OfferingRepository>,
    ) -> Self {
        Self {
            source,
            normalizer,
            repository,
            lock: Mutex::new(()),
        }
    }

    /// Refreshes one category.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Infrastructure` if the feed or the store
    /// fails; the serving data is then unchanged.
    pub async fn run_once(&self, category: OfferingCategory) -> ApplicationResult<JobOutcome> {
        let Ok(_guard) = self.lock.try_lock() else {
            tracing::info!(%category, "refresh already running, skipping");
            return Ok(JobOutcome::Skipped);
        };
        let started = Instant::now();

        let raw = self
            .source
            .fetch(category)
            .await
            .map_err(InfrastructureError::from)?;
        let fetched = raw.len();

        let offerings = self.normalizer.normalize_batch(raw).await;
        if offerings.is_empty() {
            tracing::warn!(%category, fetched, source = self.source.name(), "nothing to store, keeping serving data");
            return Ok(JobOutcome::Empty { fetched });
        }

        let stored = self
            .repository
            .replace_category(category, offerings)
            .await
            .map_err(InfrastructureError::from)?;

        tracing::info!(
            %category,
            fetched,
            stored,
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "offerings refreshed"
        );
        Ok(JobOutcome::Refreshed { fetched, stored })
    }

    /// Refreshes every category in turn, logging failures.
    pub async fn run_all(&self, categories: &[OfferingCategory]) -> Vec<(OfferingCategory, ApplicationResult<JobOutcome>)> {
        let mut outcomes = Vec::with_capacity(categories.len());
        for category in categories {
            let outcome = self.run_once(*category).await;
            if let Err(e) = &outcome {
                tracing::error!(%category, error = %e, "offering refresh failed");
            }
            outcomes.push((*category, outcome));
        }
        outcomes
    }

    /// Runs [`run_all`](Self::run_all) every `period`, starting immediately.
    pub fn spawn_periodic(
        self: Arc<Self>,
        period: Duration,
        categories: Vec<OfferingCategory>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                self.run_all(&categories).await;
            }
        })
    }
}
