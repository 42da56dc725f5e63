//! REST surface, driven through the router without a socket.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use partner_hub::api::rest::{AppState, create_router};
use partner_hub::application::jobs::OfferingRefreshJob;
use partner_hub::application::services::{
    AggregationConfig, OfferingNormalizer, QuoteAggregationEngine, TranslationPipeline,
};
use partner_hub::domain::entities::{QuotePremium, QuoteRequest, RawOfferingRecord};
use partner_hub::domain::value_objects::{Locale, OfferingCategory, ProviderId};
use partner_hub::infrastructure::feeds::OfferingSource;
use partner_hub::infrastructure::http::UpstreamError;
use partner_hub::infrastructure::persistence::in_memory::InMemoryOfferingRepository;
use partner_hub::infrastructure::providers::{
    GrossAdapter, ProviderAdapter, ProviderOpResult, ProviderQuote, ProviderRegistry,
    UnconfiguredAdapter,
};
use partner_hub::infrastructure::translation::{
    InMemoryTranslationCache, TranslationBackend, TranslationError, TranslationResult,
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

#[derive(Debug)]
struct FixedPrice;

#[async_trait]
impl ProviderAdapter for FixedPrice {
    fn provider_id(&self) -> ProviderId {
        ProviderId::Euroasia
    }

    async fn calculate(&self, request: &QuoteRequest) -> ProviderOpResult<ProviderQuote> {
        Ok(ProviderQuote::new(
            QuotePremium::new(Decimal::new(168_000, 0), None, request.period_months),
            json!({"premium": 168000}),
        ))
    }
}

#[derive(Debug)]
struct OfflineBackend;

#[async_trait]
impl TranslationBackend for OfflineBackend {
    async fn translate(&self, _text: &str, _target: Locale) -> TranslationResult<String> {
        Err(TranslationError::NotConfigured)
    }
}

#[derive(Debug)]
struct StaticFeed;

#[async_trait]
impl OfferingSource for StaticFeed {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch(&self, category: OfferingCategory) -> Result<Vec<RawOfferingRecord>, UpstreamError> {
        Ok(vec![RawOfferingRecord {
            category,
            bank_name: "Asaka bank AJ".to_string(),
            description: "Muddatli omonat".to_string(),
            rate: "22,9% dan".to_string(),
            term: "12 oyga".to_string(),
            amount: "1 mln so'mdan".to_string(),
            channel: "Onlayn ariza".to_string(),
        }])
    }
}

fn app(with_feed: bool) -> Router {
    let registry = ProviderRegistry::from_adapters(vec![
        Arc::new(FixedPrice),
        Arc::new(UnconfiguredAdapter::new(ProviderId::Neo, "neo api key")),
        Arc::new(GrossAdapter::new()),
    ]);
    let engine = Arc::new(QuoteAggregationEngine::new(
        Arc::new(registry),
        AggregationConfig::default().with_per_provider_timeout(1_000),
    ));
    let translations = Arc::new(TranslationPipeline::new(
        Arc::new(OfflineBackend),
        Arc::new(InMemoryTranslationCache::new()),
    ));
    let normalizer = Arc::new(OfferingNormalizer::new(Arc::clone(&translations)));
    let repository = Arc::new(InMemoryOfferingRepository::new());
    let refresh_job = with_feed.then(|| {
        Arc::new(OfferingRefreshJob::new(
            Arc::new(StaticFeed),
            normalizer.clone(),
            repository.clone(),
        ))
    });

    create_router(AppState {
        engine,
        translations,
        normalizer,
        repository,
        refresh_job,
    })
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn quote_body() -> Value {
    json!({
        "vehicle": {
            "gov_number": "01A123BC",
            "tech_passport_series": "AAF",
            "tech_passport_number": "1234567"
        },
        "period_months": 12,
        "driver_policy": {"type": "unlimited"},
        "payloads": [{"provider": "euroasia", "region_code": "10"}]
    })
}

#[tokio::test]
async fn health() {
    let (status, body) = send(&app(false), "GET", "/api/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn providers_are_listed_in_order_with_state() {
    let (status, body) = send(&app(false), "GET", "/api/v1/osago/providers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"provider": "euroasia", "state": "configured"},
            {"provider": "neo", "state": "config_missing"},
            {"provider": "gross", "state": "not_implemented"}
        ])
    );
}

#[tokio::test]
async fn calculate_all_is_ok_despite_provider_failures() {
    let (status, body) =
        send(&app(false), "POST", "/api/v1/osago/calculate", Some(quote_body())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0]["success"], true);
    assert_eq!(results[1]["success"], false);
    assert_eq!(results[1]["error"], "CONFIG_MISSING");
    assert_eq!(results[2]["status"], 501);
}

#[tokio::test]
async fn calculate_all_rejects_invalid_request() {
    let mut bad = quote_body();
    bad["period_months"] = json!(13);
    let (status, body) = send(&app(false), "POST", "/api/v1/osago/calculate", Some(bad)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let (status, _) = send(
        &app(false),
        "POST",
        "/api/v1/osago/calculate",
        Some(json!({"vehicle": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn single_provider_status_is_mirrored() {
    let app = app(false);
    let (status, body) =
        send(&app, "POST", "/api/v1/osago/euroasia/calculate", Some(quote_body())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["provider"], "euroasia");

    let (status, body) = send(&app, "POST", "/api/v1/osago/neo/calculate", Some(quote_body())).await;
    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert!(body["message"].as_str().unwrap().contains("config missing"));

    let (status, body) =
        send(&app, "POST", "/api/v1/osago/allianz/calculate", Some(quote_body())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn translate_returns_four_locales() {
    let (status, body) = send(
        &app(false),
        "POST",
        "/api/v1/translate",
        Some(json!({"text": "36 oygacha"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["uz"], "36 oygacha");
    assert_eq!(body["ru"], "до 36 месяцев");
    assert_eq!(body["en"], "up to 36 months");
    assert!(body["oz"].as_str().unwrap().contains("36"));
}

#[tokio::test]
async fn bank_names_are_normalized() {
    let app = app(false);
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/banks/normalize",
        Some(json!({"name": " KAPITALBANK atb "})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"canonical": "Kapitalbank", "is_bank": true, "is_known": true})
    );

    let (status, _) = send(&app, "POST", "/api/v1/banks/normalize", Some(json!({"name": " "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn offerings_normalize_drops_non_banks() {
    let (status, body) = send(
        &app(false),
        "POST",
        "/api/v1/offerings/normalize",
        Some(json!([
            {"category": "card", "bank_name": "Uzcard"},
            {"category": "card", "bank_name": "tbc bank", "channel": "Onlayn ariza"}
        ])),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let offerings = body.as_array().unwrap();
    assert_eq!(offerings.len(), 1);
    assert_eq!(offerings[0]["bank_name"], "TBC Bank");
    assert_eq!(offerings[0]["en"]["channel"], "Online application");
}

#[tokio::test]
async fn refresh_without_feed_is_unavailable() {
    let (status, body) = send(&app(false), "POST", "/api/v1/offerings/deposit/refresh", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "unavailable");
}

#[tokio::test]
async fn refresh_then_list() {
    let app = app(true);

    let (status, body) = send(&app, "GET", "/api/v1/offerings/deposit", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = send(&app, "POST", "/api/v1/offerings/deposit/refresh", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"outcome": "refreshed", "fetched": 1, "stored": 1}));

    let (status, body) = send(&app, "GET", "/api/v1/offerings/deposit", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["bank_name"], "Asakabank");
    assert_eq!(body[0]["ru"]["description"], "Срочный вклад");
    assert_eq!(body[0]["ru"]["term"], "на 12 месяцев");

    let (status, _) = send(&app, "GET", "/api/v1/offerings/pawnshop", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
