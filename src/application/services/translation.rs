//! # Translation Pipeline
//!
//! Renders one free-text field in all four locales.
//!
//! For `ru` and `en` the deterministic rules run first, in order:
//! structural patterns, known phrases, the word dictionary. Only when none
//! of them applied is the external backend consulted, through the cache.
//! Backend and cache failures are logged and degrade to the source text.
//!
//! `oz` is never translated. It is the precomposed phrase rendering when a
//! known phrase covers the whole text, the transliterated Russian output
//! when a structural rule produced it, and the transliterated source
//! otherwise.

use crate::domain::entities::LocalizedText;
use crate::domain::services::text::{clean, is_cyrillic_text, is_not_specified};
use crate::domain::services::{dictionary, phrases, rules, to_cyrillic};
use crate::domain::value_objects::Locale;
use crate::infrastructure::translation::{TranslationBackend, TranslationCache};
use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Default lifetime of a cached external translation: thirty days.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);

const CACHE_KEY_PREFIX: &str = "translation:";

/// Builds the cache key for `text` translated into `locale`.
#[must_use]
pub fn cache_key(text: &str, locale: Locale) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hasher.update("\u{1f}".as_bytes());
    hasher.update(locale.code().as_bytes());
    format!("{CACHE_KEY_PREFIX}{}", hex::encode(hasher.finalize()))
}

/// The fixed record for the "not specified" marker.
#[must_use]
pub fn not_specified() -> LocalizedText {
    LocalizedText::new("Ko'rsatilmagan", "Не указано", "Not specified", "Кўрсатилмаган")
}

/// Rewrites the Russian currency name to its Uzbek Cyrillic form.
fn oz_units(text: &str) -> String {
    text.replace("сум", "сўм").replace("Сум", "Сўм")
}

/// Output of the deterministic stage for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RuleOutput {
    text: String,
    handled: bool,
    structural: bool,
}

/// Runs the deterministic rules for `locale` over cleaned `source`.
fn apply_rules(source: &str, locale: Locale) -> RuleOutput {
    if locale == Locale::Ru && is_cyrillic_text(source) {
        return RuleOutput {
            text: source.to_string(),
            handled: true,
            structural: false,
        };
    }

    let mut text = source.to_string();
    let mut handled = false;
    let mut structural = false;

    if let Some(out) = rules::apply(&text, locale) {
        text = out;
        handled = true;
        structural = true;
    }
    if let Some(out) = phrases::apply(&text, locale) {
        text = out;
        handled = true;
    }
    if let Some(out) = dictionary::apply(&text, locale) {
        text = out;
        handled = true;
    }

    RuleOutput {
        text,
        handled,
        structural,
    }
}

/// Four-locale translation of free text.
pub struct TranslationPipeline {
    backend: Arc<dyn TranslationBackend>,
    cache: Arc<dyn TranslationCache>,
    cache_ttl: Duration,
}

impl fmt::Debug for TranslationPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationPipeline")
            .field("backend", &self.backend)
            .field("cache", &self.cache)
            .field("cache_ttl", &self.cache_ttl)
            .finish()
    }
}

impl TranslationPipeline {
    /// Creates a pipeline with the default cache lifetime.
    #[must_use]
    pub fn new(backend: Arc<dyn TranslationBackend>, cache: Arc<dyn TranslationCache>) -> Self {
        Self {
            backend,
            cache,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    /// Sets the cache lifetime.
    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Renders `text` in every locale. Never fails.
    pub async fn translate(&self, text: &str) -> LocalizedText {
        let source = clean(text);
        if source.is_empty() {
            return LocalizedText::default();
        }
        if is_not_specified(&source) {
            return not_specified();
        }

        let ru_rules = apply_rules(&source, Locale::Ru);
        let en_rules = apply_rules(&source, Locale::En);
        let (ru, en) = futures::join!(
            self.finish(&source, Locale::Ru, &ru_rules),
            self.finish(&source, Locale::En, &en_rules),
        );

        let oz = match phrases::whole_text(&source) {
            Some(phrase) => phrase.oz.to_string(),
            None if ru_rules.structural => to_cyrillic(&ru),
            None => to_cyrillic(&source),
        };

        LocalizedText::new(source, ru, en, oz_units(&oz))
    }

    /// Renders `text` in one locale.
    pub async fn translate_to(&self, text: &str, locale: Locale) -> String {
        let localized = self.translate(text).await;
        localized.get(locale).to_string()
    }

    async fn finish(&self, source: &str, locale: Locale, rules: &RuleOutput) -> String {
        if rules.handled {
            return rules.text.clone();
        }
        self.external(source, locale).await
    }

    /// Cache, then backend. Falls back to `source` on any failure.
    async fn external(&self, source: &str, locale: Locale) -> String {
        let key = cache_key(source, locale);

        match self.cache.get(&key).await {
            Ok(Some(hit)) => {
                tracing::trace!(%locale, "translation cache hit");
                return hit;
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(%locale, error = %e, "translation cache read failed"),
        }

        match self.backend.translate(source, locale).await {
            Ok(translated) => {
                if let Err(e) = self.cache.set(&key, &translated, self.cache_ttl).await {
                    tracing::warn!(%locale, error = %e, "translation cache write failed");
                }
                translated
            }
            Err(e) => {
                tracing::warn!(%locale, error = %e, "external translation failed, keeping source text");
                source.to_string()
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::infrastructure::translation::{
        InMemoryTranslationCache, TranslationError, TranslationResult,
    };
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct EchoBackend {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl TranslationBackend for EchoBackend {
        async fn translate(&self, text: &str, target: Locale) -> TranslationResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(TranslationError::EmptyResponse);
            }
            Ok(format!("[{target}] {text}"))
        }
    }

    fn pipeline(backend: Arc<EchoBackend>) -> (TranslationPipeline, Arc<InMemoryTranslationCache>) {
        let cache = Arc::new(InMemoryTranslationCache::new());
        (TranslationPipeline::new(backend, cache.clone()), cache)
    }

    #[tokio::test]
    async fn rate_range_is_rewritten_and_oz_follows_russian() {
        let backend = Arc::new(EchoBackend::default());
        let (pipeline, _) = pipeline(backend.clone());

        let text = pipeline.translate("18% dan 24% gacha").await;
        assert_eq!(text.uz, "18% dan 24% gacha");
        assert_eq!(text.ru, "от 18% до 24%");
        assert_eq!(text.en, "from 18% to 24%");
        assert_eq!(text.oz, to_cyrillic(&text.ru));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn amount_oz_uses_uzbek_currency() {
        let (pipeline, _) = pipeline(Arc::new(EchoBackend::default()));
        let text = pipeline.translate("500 mln so'mgacha").await;
        assert_eq!(text.ru, "до 500 млн сум");
        assert_eq!(text.en, "up to 500 mln UZS");
        assert_eq!(text.oz, "до 500 млн сўм");
    }

    #[tokio::test]
    async fn whole_phrase_uses_precomposed_oz() {
        let (pipeline, _) = pipeline(Arc::new(EchoBackend::default()));
        let text = pipeline.translate("Ta'lim  krediti").await;
        assert_eq!(text.uz, "Ta'lim krediti");
        assert_eq!(text.ru, "Образовательный кредит");
        assert_eq!(text.oz, "Таълим кредити");
    }

    #[tokio::test]
    async fn not_specified_marker_short_circuits() {
        let backend = Arc::new(EchoBackend::default());
        let (pipeline, cache) = pipeline(backend.clone());
        for marker in ["Ko'rsatilmagan", "KO\u{2018}RSATILMAGAN", " ko`rsatilmagan "] {
            assert_eq!(pipeline.translate(marker).await, not_specified());
        }
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
        assert_eq!(cache.reads(), 0);
    }

    #[tokio::test]
    async fn empty_input_gives_empty_record() {
        let (pipeline, _) = pipeline(Arc::new(EchoBackend::default()));
        let text = pipeline.translate("   ").await;
        assert!(text.is_empty());
    }

    #[tokio::test]
    async fn unknown_text_is_translated_once_then_cached() {
        let backend = Arc::new(EchoBackend::default());
        let (pipeline, cache) = pipeline(backend.clone());

        let first = pipeline.translate_to("Zo'r taklif", Locale::Ru).await;
        let second = pipeline.translate_to("Zo'r taklif", Locale::Ru).await;
        assert_eq!(first, "[ru] Zo'r taklif");
        assert_eq!(first, second);
        // one miss + one hit per locale
        assert_eq!(backend.calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.reads(), 4);
        assert_eq!(cache.writes(), 2);
    }

    #[tokio::test]
    async fn backend_failure_keeps_source_text() {
        let backend = Arc::new(EchoBackend {
            fail: true,
            ..EchoBackend::default()
        });
        let (pipeline, cache) = pipeline(backend);
        let text = pipeline.translate("Zo'r taklif").await;
        assert_eq!(text.ru, "Zo'r taklif");
        assert_eq!(text.en, "Zo'r taklif");
        assert_eq!(text.oz, "Зўр таклиф");
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn russian_input_is_left_alone() {
        let backend = Arc::new(EchoBackend::default());
        let (pipeline, _) = pipeline(backend);
        let text = pipeline.translate("от 18% до 24%").await;
        assert_eq!(text.ru, "от 18% до 24%");
    }

    #[test]
    fn cache_key_depends_on_text_and_locale() {
        let ru = cache_key("salom", Locale::Ru);
        assert!(ru.starts_with("translation:"));
        assert_eq!(ru.len(), "translation:".len() + 64);
        assert_eq!(ru, cache_key("salom", Locale::Ru));
        assert_ne!(ru, cache_key("salom", Locale::En));
        assert_ne!(ru, cache_key("salom!", Locale::Ru));
    }
}
