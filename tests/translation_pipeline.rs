//! Translation pipeline, offering normalizer and refresh job wired to
//! mocked HTTP backends.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use partner_hub::application::jobs::{JobOutcome, OfferingRefreshJob};
use partner_hub::application::services::{
    OfferingNormalization, OfferingNormalizer, TranslationPipeline,
};
use partner_hub::domain::entities::RawOfferingRecord;
use partner_hub::domain::value_objects::{Locale, OfferingCategory};
use partner_hub::infrastructure::feeds::{FeedConfig, HttpOfferingFeed};
use partner_hub::infrastructure::persistence::OfferingRepository;
use partner_hub::infrastructure::persistence::in_memory::InMemoryOfferingRepository;
use partner_hub::infrastructure::translation::{
    HttpTranslationBackend, InMemoryTranslationCache, TranslationConfig,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend(server: &MockServer) -> Arc<HttpTranslationBackend> {
    let config = TranslationConfig {
        base_url: format!("{}/translate", server.uri()),
        api_key: Some("test-key".to_string()),
        ..TranslationConfig::default()
    };
    Arc::new(HttpTranslationBackend::from_config(&config).unwrap())
}

async fn mount_translation(server: &MockServer, target: &str, translated: &str, calls: u64) {
    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(json!({"target": target})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"translations": [{"translatedText": translated}]}
        })))
        .expect(calls)
        .mount(server)
        .await;
}

fn record(bank: &str, description: &str) -> RawOfferingRecord {
    RawOfferingRecord {
        category: OfferingCategory::AutoLoan,
        bank_name: bank.to_string(),
        description: description.to_string(),
        rate: "18% dan 24% gacha".to_string(),
        term: "36 oygacha".to_string(),
        amount: "500 mln so'mgacha".to_string(),
        channel: "Onlayn ariza".to_string(),
    }
}

#[tokio::test]
async fn unknown_text_goes_to_backend_once_per_locale() {
    let server = MockServer::start().await;
    mount_translation(&server, "ru", "Отличное предложение", 1).await;
    mount_translation(&server, "en", "Great offer", 1).await;

    let cache = Arc::new(InMemoryTranslationCache::new());
    let pipeline = TranslationPipeline::new(backend(&server), cache.clone())
        .with_cache_ttl(Duration::from_secs(60));

    let first = pipeline.translate("Zo'r  taklif").await;
    let second = pipeline.translate("Zo'r taklif").await;

    assert_eq!(first.uz, "Zo'r taklif");
    assert_eq!(first.ru, "Отличное предложение");
    assert_eq!(first.en, "Great offer");
    assert_eq!(first.oz, "Зўр таклиф");
    assert_eq!(second, first);
    assert_eq!(cache.len(), 2);
}

#[tokio::test]
async fn rule_covered_fields_never_reach_the_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let pipeline =
        TranslationPipeline::new(backend(&server), Arc::new(InMemoryTranslationCache::new()));

    assert_eq!(pipeline.translate_to("36 oygacha", Locale::Ru).await, "до 36 месяцев");
    assert_eq!(pipeline.translate_to("36 oygacha", Locale::En).await, "up to 36 months");
    assert_eq!(pipeline.translate_to("Avtokredit", Locale::En).await, "Car loan");
    assert_eq!(pipeline.translate_to("Avtokredit", Locale::Oz).await, "Автокредит");
}

#[tokio::test]
async fn backend_outage_degrades_to_source_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("quota exceeded"))
        .mount(&server)
        .await;

    let cache = Arc::new(InMemoryTranslationCache::new());
    let pipeline = TranslationPipeline::new(backend(&server), cache.clone());

    let text = pipeline.translate("Zo'r taklif").await;
    assert_eq!(text.ru, "Zo'r taklif");
    assert_eq!(text.en, "Zo'r taklif");
    assert!(cache.is_empty());
}

#[tokio::test]
async fn batch_drops_payment_apps_and_keeps_order() {
    let server = MockServer::start().await;
    let pipeline = Arc::new(TranslationPipeline::new(
        backend(&server),
        Arc::new(InMemoryTranslationCache::new()),
    ));
    let normalizer = OfferingNormalizer::new(pipeline);

    let offerings = normalizer
        .normalize_batch(vec![
            record("KAPITALBANK ATB", "Avtokredit"),
            record("Payme", "Avtokredit"),
            record("ipak yo`li banki", "Avtokredit"),
        ])
        .await;

    let banks: Vec<_> = offerings.iter().map(|o| o.bank_name.as_str()).collect();
    assert_eq!(banks, vec!["Kapitalbank", "Ipak Yo'li Banki"]);

    let first = &offerings[0];
    assert_eq!(first.uz.rate, "18% dan 24% gacha");
    assert_eq!(first.ru.rate, "от 18% до 24%");
    assert_eq!(first.en.amount, "up to 500 mln UZS");
    assert_eq!(first.oz.amount, "до 500 млн сўм");
    assert_eq!(first.ru.channel, "Онлайн-заявка");
    assert_eq!(first.en.description, "Car loan");
}

#[tokio::test]
async fn refresh_job_pulls_feed_into_store() {
    let feed_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/offerings"))
        .and(query_param("category", "auto_loan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "category": "auto_loan",
                "bank_name": "Hamkor bank",
                "description": "Avtokredit",
                "rate": "22,9% dan",
                "term": "1 yildan 5 yilgacha",
                "amount": "300 mln so'mgacha",
                "channel": "Onlayn ariza"
            },
            {"category": "auto_loan", "bank_name": "Click"}
        ])))
        .mount(&feed_server)
        .await;

    let translation_server = MockServer::start().await;
    let pipeline = Arc::new(TranslationPipeline::new(
        backend(&translation_server),
        Arc::new(InMemoryTranslationCache::new()),
    ));
    let feed = HttpOfferingFeed::from_config(&FeedConfig {
        url: format!("{}/offerings", feed_server.uri()),
        ..FeedConfig::default()
    })
    .unwrap();
    let repository = Arc::new(InMemoryOfferingRepository::new());
    let job = OfferingRefreshJob::new(
        Arc::new(feed),
        Arc::new(OfferingNormalizer::new(pipeline)),
        repository.clone(),
    );

    let outcome = job.run_once(OfferingCategory::AutoLoan).await.unwrap();
    assert_eq!(
        outcome,
        JobOutcome::Refreshed {
            fetched: 2,
            stored: 1
        }
    );

    let stored = repository.find_by_category(OfferingCategory::AutoLoan).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].bank_name, "Hamkorbank");
    assert_eq!(stored[0].ru.rate, "от 22,9%");
    assert_eq!(stored[0].ru.term, "от 1 до 5 лет");
    assert!(repository.find_by_category(OfferingCategory::Deposit).await.unwrap().is_empty());
}
