//! # REST Handlers
//!
//! Request/response types and axum handlers.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::jobs::{JobOutcome, OfferingRefreshJob};
use crate::application::services::{
    OfferingNormalization, OfferingNormalizer, QuoteAggregationEngine, TranslationPipeline,
};
use crate::domain::entities::{
    AggregatedQuote, CanonicalOffering, LocalizedText, ProviderResult, QuoteRequest,
    RawOfferingRecord,
};
use crate::domain::services::BankNameNormalizer;
use crate::domain::value_objects::OfferingCategory;
use crate::infrastructure::persistence::OfferingRepository;
use crate::infrastructure::providers::ProviderDescriptor;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Provider fan-out engine.
    pub engine: Arc<QuoteAggregationEngine>,
    /// Four-locale text pipeline.
    pub translations: Arc<TranslationPipeline>,
    /// Raw to canonical offering normalizer.
    pub normalizer: Arc<OfferingNormalizer>,
    /// Serving store for canonical offerings.
    pub repository: Arc<dyn OfferingRepository>,
    /// Refresh job, when a partner feed is configured.
    pub refresh_job: Option<Arc<OfferingRefreshJob>>,
}

/// Error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: self.error_code().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Unwraps a JSON body, reporting malformed input as a validation error.
fn body<T>(payload: Result<Json<T>, JsonRejection>) -> ApplicationResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApplicationError::validation(rejection.body_text()))
}

fn parse_category(raw: &str) -> ApplicationResult<OfferingCategory> {
    raw.parse()
        .map_err(|_| ApplicationError::not_found("offering category", raw))
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `ok`.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
}

/// `GET /api/v1/health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /api/v1/osago/providers`
pub async fn list_providers(State(state): State<AppState>) -> Json<Vec<ProviderDescriptor>> {
    Json(state.engine.providers())
}

/// `POST /api/v1/osago/calculate`
///
/// # Errors
///
/// 400 if the request fails validation. Provider failures are reported
/// inside the envelope.
pub async fn calculate_all(
    State(state): State<AppState>,
    payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> ApplicationResult<Json<AggregatedQuote>> {
    let request = body(payload)?;
    Ok(Json(state.engine.calculate_all(request).await?))
}

/// `POST /api/v1/osago/{provider}/calculate`
///
/// The response status mirrors the provider result.
///
/// # Errors
///
/// 404 for an unknown provider, 400 if the request fails validation.
pub async fn calculate_one(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> ApplicationResult<(StatusCode, Json<ProviderResult>)> {
    let request = body(payload)?;
    let result = state.engine.calculate_one(&provider, request).await?;
    let status = StatusCode::from_u16(result.status()).unwrap_or(StatusCode::BAD_GATEWAY);
    Ok((status, Json(result)))
}

/// Body of `POST /api/v1/translate`.
#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    /// Uzbek (Latin) source text.
    pub text: String,
}

/// `POST /api/v1/translate`
///
/// # Errors
///
/// 400 for a malformed body.
pub async fn translate(
    State(state): State<AppState>,
    payload: Result<Json<TranslateRequest>, JsonRejection>,
) -> ApplicationResult<Json<LocalizedText>> {
    let request = body(payload)?;
    Ok(Json(state.translations.translate(&request.text).await))
}

/// Body of `POST /api/v1/banks/normalize`.
#[derive(Debug, Deserialize)]
pub struct BankNameRequest {
    /// Bank name as scraped.
    pub name: String,
}

/// Response of `POST /api/v1/banks/normalize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankNameResponse {
    /// Canonical display name.
    pub canonical: String,
    /// False for payment apps.
    pub is_bank: bool,
    /// True if found in the known-bank table.
    pub is_known: bool,
}

/// `POST /api/v1/banks/normalize`
///
/// # Errors
///
/// 400 for a malformed body or a blank name.
pub async fn normalize_bank(
    payload: Result<Json<BankNameRequest>, JsonRejection>,
) -> ApplicationResult<Json<BankNameResponse>> {
    let request = body(payload)?;
    if request.name.trim().is_empty() {
        return Err(ApplicationError::validation("name must not be blank"));
    }
    let banks = BankNameNormalizer::new();
    Ok(Json(BankNameResponse {
        canonical: banks.normalize(&request.name),
        is_bank: banks.is_bank(&request.name),
        is_known: banks.is_known(&request.name),
    }))
}

/// `POST /api/v1/offerings/normalize`
///
/// Non-bank rows are dropped.
///
/// # Errors
///
/// 400 for a malformed body.
pub async fn normalize_offerings(
    State(state): State<AppState>,
    payload: Result<Json<Vec<RawOfferingRecord>>, JsonRejection>,
) -> ApplicationResult<Json<Vec<CanonicalOffering>>> {
    let records = body(payload)?;
    Ok(Json(state.normalizer.normalize_batch(records).await))
}

/// `GET /api/v1/offerings/{category}`
///
/// # Errors
///
/// 404 for an unknown category, 502 if the store fails.
pub async fn list_offerings(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> ApplicationResult<Json<Vec<CanonicalOffering>>> {
    let category = parse_category(&category)?;
    let offerings = state
        .repository
        .find_by_category(category)
        .await
        .map_err(crate::application::error::InfrastructureError::from)?;
    Ok(Json(offerings))
}

/// Response of `POST /api/v1/offerings/{category}/refresh`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// `refreshed`, `empty` or `skipped`.
    pub outcome: String,
    /// Records fetched.
    pub fetched: usize,
    /// Records stored.
    pub stored: usize,
}

impl From<JobOutcome> for RefreshResponse {
    fn from(outcome: JobOutcome) -> Self {
        match outcome {
            JobOutcome::Skipped => Self {
                outcome: "skipped".to_string(),
                fetched: 0,
                stored: 0,
            },
            JobOutcome::Empty { fetched } => Self {
                outcome: "empty".to_string(),
                fetched,
                stored: 0,
            },
            JobOutcome::Refreshed { fetched, stored } => Self {
                outcome: "refreshed".to_string(),
                fetched,
                stored,
            },
        }
    }
}

/// `POST /api/v1/offerings/{category}/refresh`
///
/// # Errors
///
/// 404 for an unknown category, 503 without a configured feed, 502 if the
/// feed or the store fails.
pub async fn refresh_offerings(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> ApplicationResult<Json<RefreshResponse>> {
    let category = parse_category(&category)?;
    let job = state
        .refresh_job
        .as_ref()
        .ok_or_else(|| ApplicationError::unavailable("offering feed is not configured"))?;
    Ok(Json(job.run_once(category).await?.into()))
}
