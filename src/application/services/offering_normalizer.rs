//! # Offering Normalizer
//!
//! Turns raw scraped offerings into canonical four-locale records: the bank
//! name goes through [`BankNameNormalizer`], every free-text field through
//! the [`TranslationPipeline`].

use crate::application::services::translation::TranslationPipeline;
use crate::domain::entities::{CanonicalOffering, RawOfferingRecord};
use crate::domain::services::BankNameNormalizer;
use async_trait::async_trait;
use futures::StreamExt;
use futures::stream;
use std::fmt;
use std::sync::Arc;

/// Records normalized concurrently within one batch.
const BATCH_CONCURRENCY: usize = 8;

/// Port the refresh job uses to normalize fetched records.
#[async_trait]
pub trait OfferingNormalization: Send + Sync + fmt::Debug {
    /// Normalizes one record. Never fails.
    async fn normalize(&self, record: &RawOfferingRecord) -> CanonicalOffering;

    /// Normalizes `records` in order, dropping rows that are not banks.
    async fn normalize_batch(&self, records: Vec<RawOfferingRecord>) -> Vec<CanonicalOffering>;
}

/// Default [`OfferingNormalization`] implementation.
#[derive(Debug, Clone)]
pub struct OfferingNormalizer {
    banks: BankNameNormalizer,
    translations: Arc<TranslationPipeline>,
}

impl OfferingNormalizer {
    /// Creates a normalizer over a translation pipeline.
    #[must_use]
    pub fn new(translations: Arc<TranslationPipeline>) -> Self {
        Self {
            banks: BankNameNormalizer::new(),
            translations,
        }
    }

    /// Returns the bank name normalizer.
    #[must_use]
    pub fn banks(&self) -> &BankNameNormalizer {
        &self.banks
    }
}

#[async_trait]
impl OfferingNormalization for OfferingNormalizer {
    async fn normalize(&self, record: &RawOfferingRecord) -> CanonicalOffering {
        let t = &self.translations;
        let (description, rate, term, amount, channel) = futures::join!(
            t.translate(&record.description),
            t.translate(&record.rate),
            t.translate(&record.term),
            t.translate(&record.amount),
            t.translate(&record.channel),
        );

        CanonicalOffering::from_localized(
            record.category,
            self.banks.normalize(&record.bank_name),
            description,
            rate,
            term,
            amount,
            channel,
        )
    }

    async fn normalize_batch(&self, records: Vec<RawOfferingRecord>) -> Vec<CanonicalOffering> {
        let total = records.len();
        let banks: Vec<_> = records
            .into_iter()
            .filter(|r| {
                let keep = self.banks.is_bank(&r.bank_name);
                if !keep {
                    tracing::debug!(bank_name = %r.bank_name, "dropping non-bank offering");
                }
                keep
            })
            .collect();
        let dropped = total - banks.len();

        let normalized: Vec<_> = stream::iter(banks)
            .map(|record| async move { self.normalize(&record).await })
            .buffered(BATCH_CONCURRENCY)
            .collect()
            .await;

        tracing::debug!(total, dropped, normalized = normalized.len(), "offering batch normalized");
        normalized
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Locale, OfferingCategory};
    use crate::infrastructure::translation::{
        InMemoryTranslationCache, TranslationBackend, TranslationError, TranslationResult,
    };

    #[derive(Debug)]
    struct OfflineBackend;

    #[async_trait]
    impl TranslationBackend for OfflineBackend {
        async fn translate(&self, _text: &str, _target: Locale) -> TranslationResult<String> {
            Err(TranslationError::NotConfigured)
        }
    }

    fn normalizer() -> OfferingNormalizer {
        OfferingNormalizer::new(Arc::new(TranslationPipeline::new(
            Arc::new(OfflineBackend),
            Arc::new(InMemoryTranslationCache::new()),
        )))
    }

    fn record(bank: &str) -> RawOfferingRecord {
        RawOfferingRecord {
            category: OfferingCategory::Loan,
            bank_name: bank.to_string(),
            description: "Ta'lim krediti".to_string(),
            rate: "18% dan 24% gacha".to_string(),
            term: "36 oygacha".to_string(),
            amount: "500 mln so'mgacha".to_string(),
            channel: String::new(),
        }
    }

    #[tokio::test]
    async fn normalizes_every_field_in_every_locale() {
        let offering = normalizer().normalize(&record("\"KAPITALBANK\" ATB")).await;

        assert_eq!(offering.bank_name, "Kapitalbank");
        assert_eq!(offering.category, OfferingCategory::Loan);
        assert_eq!(offering.uz.rate, "18% dan 24% gacha");
        assert_eq!(offering.ru.rate, "от 18% до 24%");
        assert_eq!(offering.ru.term, "до 36 месяцев");
        assert_eq!(offering.ru.amount, "до 500 млн сум");
        assert_eq!(offering.oz.description, "Таълим кредити");
        assert_eq!(offering.en.channel, "");
        assert_eq!(offering.oz.channel, "");
    }

    #[tokio::test]
    async fn batch_drops_payment_apps_and_keeps_order() {
        let batch = normalizer()
            .normalize_batch(vec![record("Hamkorbank"), record("Payme"), record("Ipoteka bank")])
            .await;
        let names: Vec<_> = batch.iter().map(|o| o.bank_name.as_str()).collect();
        assert_eq!(names.len(), 2);
        assert_eq!(names[0], "Hamkorbank");
    }

    #[tokio::test]
    async fn batch_larger_than_concurrency_window_keeps_order() {
        let names = ["Hamkorbank", "Kapitalbank", "Asakabank", "Infin Bank", "TBC Bank"];
        let records: Vec<_> = names
            .iter()
            .cycle()
            .take(BATCH_CONCURRENCY * 2 + 3)
            .map(|name| record(name))
            .collect();
        let expected: Vec<_> = records.iter().map(|r| r.bank_name.clone()).collect();

        let batch = normalizer().normalize_batch(records).await;
        let got: Vec<_> = batch.into_iter().map(|o| o.bank_name).collect();
        assert_eq!(got, expected);
    }
}
