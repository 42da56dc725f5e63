//! # Euroasia Adapter
//!
//! Euroasia prices OSAGO in three calls:
//!
//! 1. `POST /api/auth/login` for a short-lived access token, cached until
//!    its lifetime minus a safety margin has passed.
//! 2. `POST /api/osago/vehicle` to classify the vehicle owner. Pricing is
//!    never attempted without this classification.
//! 3. `POST /api/osago/calculate` with the classification and the request
//!    fields. HTTP 200 with a parsable premium is success.

use crate::domain::entities::{DriverPolicy, ProviderPayload, QuotePremium, QuoteRequest};
use crate::domain::value_objects::ProviderId;
use crate::infrastructure::http::{HttpClient, UpstreamError, bearer};
use crate::infrastructure::providers::config::EuroasiaConfig;
use crate::infrastructure::providers::error::{ProviderError, ProviderOpResult};
use crate::infrastructure::providers::token_cache::{IssuedToken, TokenCache};
use crate::infrastructure::providers::traits::{ProviderAdapter, ProviderQuote};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Serialize)]
struct VehicleRequest<'a> {
    gov_number: &'a str,
    tech_passport_series: &'a str,
    tech_passport_number: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    owner_pinfl: Option<&'a str>,
}

/// Owner classification returned by the vehicle lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum OwnerType {
    Physical,
    Juridical,
}

#[derive(Debug, Clone, Deserialize)]
struct VehicleClassification {
    vehicle_type_id: u32,
    owner_type: OwnerType,
}

#[derive(Debug, Serialize)]
struct CalculateRequest<'a> {
    vehicle_type_id: u32,
    owner_type: OwnerType,
    region_code: &'a str,
    period_months: u8,
    driver_limit: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    drivers_count: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct CalculateResponse {
    premium: Decimal,
    #[serde(default)]
    insurance_sum: Option<Decimal>,
}

/// Adapter for Euroasia Insurance.
#[derive(Debug)]
pub struct EuroasiaAdapter {
    client: HttpClient,
    base_url: String,
    username: String,
    password: String,
    tokens: TokenCache,
}

impl EuroasiaAdapter {
    /// Creates an adapter from configuration.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::ConfigMissing` without credentials and
    /// `ProviderError::Upstream` if the HTTP client cannot be built.
    pub fn from_config(config: &EuroasiaConfig, http_timeout_ms: u64) -> ProviderOpResult<Self> {
        let (username, password) = config
            .credentials()
            .ok_or_else(|| ProviderError::config_missing("euroasia username/password"))?;
        Ok(Self {
            client: HttpClient::new(http_timeout_ms)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: username.to_string(),
            password: password.to_string(),
            tokens: TokenCache::default(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn access_token(&self) -> ProviderOpResult<String> {
        self.tokens
            .get_or_refresh(|| async {
                let response: LoginResponse = self
                    .client
                    .post(
                        &self.url("/api/auth/login"),
                        &LoginRequest {
                            username: &self.username,
                            password: &self.password,
                        },
                    )
                    .await?;
                Ok::<_, ProviderError>(IssuedToken {
                    token: response.access_token,
                    expires_in: Duration::from_secs(response.expires_in),
                })
            })
            .await
    }

    async fn classify(
        &self,
        token: &str,
        request: &QuoteRequest,
        owner_pinfl: Option<&str>,
    ) -> ProviderOpResult<VehicleClassification> {
        let vehicle = &request.vehicle;
        let body = VehicleRequest {
            gov_number: vehicle.gov_number.trim(),
            tech_passport_series: vehicle.tech_passport_series.trim(),
            tech_passport_number: vehicle.tech_passport_number.trim(),
            owner_pinfl,
        };

        self.authorized_post("/api/osago/vehicle", token, &body).await
    }

    /// Posts with the bearer token; a rejected token is dropped from the cache.
    async fn authorized_post<T, B>(&self, path: &str, token: &str, body: &B) -> ProviderOpResult<T>
    where
        T: DeserializeOwned + Send,
        B: Serialize + Sync + ?Sized,
    {
        let result = self
            .client
            .post_with_headers(&self.url(path), body, bearer(token)?)
            .await;
        if let Err(UpstreamError::Authentication { .. }) = &result {
            self.tokens.invalidate().await;
        }
        result.map_err(ProviderError::from)
    }
}

#[async_trait]
impl ProviderAdapter for EuroasiaAdapter {
    fn provider_id(&self) -> ProviderId {
        ProviderId::Euroasia
    }

    async fn calculate(&self, request: &QuoteRequest) -> ProviderOpResult<ProviderQuote> {
        let Some(ProviderPayload::Euroasia(payload)) = request.payload_for(ProviderId::Euroasia)
        else {
            return Err(ProviderError::invalid_payload("euroasia payload is required"));
        };

        let token = self.access_token().await?;
        let classification = self
            .classify(&token, request, payload.owner_pinfl.as_deref())
            .await?;
        tracing::debug!(
            vehicle_type_id = classification.vehicle_type_id,
            owner_type = ?classification.owner_type,
            "euroasia vehicle classified"
        );

        let (driver_limit, drivers_count) = match request.driver_policy {
            DriverPolicy::Unlimited => ("unlimited", None),
            DriverPolicy::Limited { count } => ("limited", Some(count)),
        };
        let body = CalculateRequest {
            vehicle_type_id: classification.vehicle_type_id,
            owner_type: classification.owner_type,
            region_code: payload.region_code.trim(),
            period_months: request.period_months,
            driver_limit,
            drivers_count,
        };

        let raw: serde_json::Value = self
            .authorized_post("/api/osago/calculate", &token, &body)
            .await?;
        let priced: CalculateResponse = serde_json::from_value(raw.clone())
            .map_err(|e| UpstreamError::parse(format!("euroasia calculate response: {e}")))?;

        Ok(ProviderQuote::new(
            QuotePremium::new(priced.premium, priced.insurance_sum, request.period_months),
            raw,
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_credentials_are_rejected() {
        let err = EuroasiaAdapter::from_config(&EuroasiaConfig::new("http://x"), 1000).unwrap_err();
        assert_eq!(err.to_string(), "config missing: euroasia username/password");
    }

    #[test]
    fn calculate_response_accepts_numbers_and_strings() {
        let parsed: CalculateResponse =
            serde_json::from_str(r#"{"premium": 168000, "insurance_sum": "40000000"}"#).unwrap();
        assert_eq!(parsed.premium, Decimal::new(168_000, 0));
        assert_eq!(parsed.insurance_sum, Some(Decimal::new(40_000_000, 0)));
    }

    #[test]
    fn calculate_request_shape() {
        let body = CalculateRequest {
            vehicle_type_id: 2,
            owner_type: OwnerType::Juridical,
            region_code: "10",
            period_months: 12,
            driver_limit: "limited",
            drivers_count: Some(2),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["owner_type"], "juridical");
        assert_eq!(json["drivers_count"], 2);
    }
}
