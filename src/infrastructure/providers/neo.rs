//! # NEO Adapter
//!
//! NEO authenticates with a static `X-Api-Key` header and wraps every answer
//! in an envelope `{ error, result, message, data }`. A call succeeded only
//! when `error == 0` **and** `result == true`; both are checked.
//!
//! Before pricing, the unified vehicle group id is mapped to NEO's own id by
//! scanning the vehicle group reference list. No match means no pricing
//! call.

use crate::domain::entities::{DriverPolicy, ProviderPayload, QuotePremium, QuoteRequest};
use crate::domain::value_objects::ProviderId;
use crate::infrastructure::http::{HttpClient, UpstreamError, single_header};
use crate::infrastructure::providers::config::NeoConfig;
use crate::infrastructure::providers::error::{ProviderError, ProviderOpResult};
use crate::infrastructure::providers::reference_cache::ReferenceCache;
use crate::infrastructure::providers::traits::{ProviderAdapter, ProviderQuote};
use async_trait::async_trait;
use reqwest::header::HeaderName;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

const API_KEY_HEADER: &str = "x-api-key";

/// NEO response envelope.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    error: i64,
    result: bool,
    #[serde(default)]
    message: Option<String>,
    data: Option<T>,
}

impl<T> Envelope<T> {
    fn is_success(&self) -> bool {
        self.error == 0 && self.result
    }

    /// Returns the payload of a successful envelope.
    fn into_data(self, what: &str) -> ProviderOpResult<T> {
        if !self.is_success() {
            let message = self
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| format!("neo {what} declined"));
            return Err(ProviderError::rejected(message, Some(self.error.to_string())));
        }
        self.data
            .ok_or_else(|| UpstreamError::parse(format!("neo {what} response has no data")).into())
    }
}

fn parse_envelope<T: DeserializeOwned>(raw: &serde_json::Value, what: &str) -> ProviderOpResult<Envelope<T>> {
    serde_json::from_value(raw.clone())
        .map_err(|e| UpstreamError::parse(format!("neo {what} response: {e}")).into())
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

/// One entry of the vehicle group reference list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VehicleGroup {
    /// NEO-local group id.
    pub id: u32,
    /// Unified external group id.
    #[serde(deserialize_with = "string_or_number")]
    pub external_id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Serialize)]
struct CalculateRequest<'a> {
    vehicle_group_id: u32,
    region_id: u32,
    period_months: u8,
    unlimited_drivers: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    drivers_count: Option<u8>,
    gov_number: &'a str,
    tech_passport_series: &'a str,
    tech_passport_number: &'a str,
}

#[derive(Debug, Deserialize)]
struct Pricing {
    premium: Decimal,
    #[serde(default)]
    insurance_sum: Option<Decimal>,
}

/// Adapter for NEO Insurance.
#[derive(Debug)]
pub struct NeoAdapter {
    client: HttpClient,
    base_url: String,
    groups: ReferenceCache<Vec<VehicleGroup>>,
}

impl NeoAdapter {
    /// Creates an adapter from configuration.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::ConfigMissing` without an API key and
    /// `ProviderError::Upstream` if the HTTP client cannot be built.
    pub fn from_config(config: &NeoConfig, http_timeout_ms: u64) -> ProviderOpResult<Self> {
        let api_key = config
            .api_key()
            .ok_or_else(|| ProviderError::config_missing("neo api key"))?;
        let headers = single_header(HeaderName::from_static(API_KEY_HEADER), api_key)?;
        Ok(Self {
            client: HttpClient::with_headers(http_timeout_ms, headers)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            groups: ReferenceCache::new(config.reference_ttl()),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn vehicle_groups(&self) -> ProviderOpResult<Vec<VehicleGroup>> {
        self.groups
            .get_or_fetch(|| async {
                let raw: serde_json::Value = self
                    .client
                    .get(&self.url("/api/v1/references/vehicle-groups"))
                    .await?;
                parse_envelope::<Vec<VehicleGroup>>(&raw, "vehicle groups")?
                    .into_data("vehicle groups")
            })
            .await
    }

    /// Maps a unified vehicle group id to NEO's local id.
    async fn map_vehicle_group(&self, external_id: &str) -> ProviderOpResult<u32> {
        let groups = self.vehicle_groups().await?;
        groups
            .iter()
            .find(|g| g.external_id.trim() == external_id)
            .map(|g| g.id)
            .ok_or_else(|| ProviderError::not_found(format!("vehicle group {external_id}")))
    }
}

#[async_trait]
impl ProviderAdapter for NeoAdapter {
    fn provider_id(&self) -> ProviderId {
        ProviderId::Neo
    }

    async fn calculate(&self, request: &QuoteRequest) -> ProviderOpResult<ProviderQuote> {
        let Some(ProviderPayload::Neo(payload)) = request.payload_for(ProviderId::Neo) else {
            return Err(ProviderError::invalid_payload("neo payload is required"));
        };
        let Some(external_id) = request
            .vehicle
            .group_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
        else {
            return Err(ProviderError::invalid_payload(
                "vehicle.group_id is required for neo",
            ));
        };

        let vehicle_group_id = self.map_vehicle_group(external_id).await?;
        tracing::debug!(external_id, vehicle_group_id, "neo vehicle group mapped");

        let (unlimited_drivers, drivers_count) = match request.driver_policy {
            DriverPolicy::Unlimited => (true, None),
            DriverPolicy::Limited { count } => (false, Some(count)),
        };
        let vehicle = &request.vehicle;
        let body = CalculateRequest {
            vehicle_group_id,
            region_id: payload.region_id,
            period_months: request.period_months,
            unlimited_drivers,
            drivers_count,
            gov_number: vehicle.gov_number.trim(),
            tech_passport_series: vehicle.tech_passport_series.trim(),
            tech_passport_number: vehicle.tech_passport_number.trim(),
        };

        let raw: serde_json::Value = self
            .client
            .post(&self.url("/api/v1/osago/calculate"), &body)
            .await?;
        let pricing = parse_envelope::<Pricing>(&raw, "calculate")?.into_data("calculate")?;

        Ok(ProviderQuote::new(
            QuotePremium::new(pricing.premium, pricing.insurance_sum, request.period_months),
            raw,
        ))
    }
}
