//! # Quote Request
//!
//! Provider-agnostic OSAGO premium request.
//!
//! A [`QuoteRequest`] carries the cross-provider fields every adapter needs
//! (vehicle identity, period, driver policy, locale) plus one optional
//! [`ProviderPayload`] per provider for fields only that provider understands.
//! Adapters only ever see their own payload through
//! [`QuoteRequest::payload_for`].
//!
//! # Examples
//!
//! ```
//! use partner_hub::domain::entities::quote_request::{DriverPolicy, QuoteRequest, VehicleIdentity};
//!
//! let request = QuoteRequest::new(
//!     VehicleIdentity::new("01A123BC", "AAF", "1234567"),
//!     12,
//!     DriverPolicy::Unlimited,
//! );
//! assert!(request.validate().is_ok());
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{Locale, ProviderId};
use serde::{Deserialize, Serialize};

/// Longest insurance period accepted, in months.
pub const MAX_PERIOD_MONTHS: u8 = 12;

/// Largest named-driver list accepted for a limited policy.
pub const MAX_LIMITED_DRIVERS: u8 = 5;

/// Vehicle registration data shared by all providers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleIdentity {
    /// State registration plate, e.g. `01A123BC`.
    pub gov_number: String,
    /// Technical passport series, e.g. `AAF`.
    pub tech_passport_series: String,
    /// Technical passport number.
    pub tech_passport_number: String,
    /// Unified external vehicle group identifier, mapped per provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

impl VehicleIdentity {
    /// Creates a vehicle identity without a group identifier.
    #[must_use]
    pub fn new(
        gov_number: impl Into<String>,
        tech_passport_series: impl Into<String>,
        tech_passport_number: impl Into<String>,
    ) -> Self {
        Self {
            gov_number: gov_number.into(),
            tech_passport_series: tech_passport_series.into(),
            tech_passport_number: tech_passport_number.into(),
            group_id: None,
        }
    }

    /// Sets the unified vehicle group identifier.
    #[must_use]
    pub fn with_group_id(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    fn validate(&self) -> DomainResult<()> {
        if self.gov_number.trim().is_empty() {
            return Err(DomainError::MissingField("vehicle.gov_number"));
        }
        if self.tech_passport_series.trim().is_empty() {
            return Err(DomainError::MissingField("vehicle.tech_passport_series"));
        }
        if self.tech_passport_number.trim().is_empty() {
            return Err(DomainError::MissingField("vehicle.tech_passport_number"));
        }
        if !self
            .tech_passport_number
            .trim()
            .chars()
            .all(|c| c.is_ascii_digit())
        {
            return Err(DomainError::invalid_field(
                "vehicle.tech_passport_number",
                "must contain digits only",
            ));
        }
        Ok(())
    }
}

/// Who may drive the insured vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DriverPolicy {
    /// Any driver.
    Unlimited,
    /// A fixed number of named drivers.
    Limited {
        /// Number of named drivers.
        count: u8,
    },
}

impl DriverPolicy {
    /// Returns true if the number of drivers is unrestricted.
    #[inline]
    #[must_use]
    pub const fn is_unlimited(self) -> bool {
        matches!(self, Self::Unlimited)
    }

    fn validate(self) -> DomainResult<()> {
        match self {
            Self::Unlimited => Ok(()),
            Self::Limited { count } if (1..=MAX_LIMITED_DRIVERS).contains(&count) => Ok(()),
            Self::Limited { .. } => Err(DomainError::invalid_field(
                "driver_policy.count",
                format!("must be between 1 and {}", MAX_LIMITED_DRIVERS),
            )),
        }
    }
}

/// Euroasia-specific request fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EuroasiaPayload {
    /// Region code of the owner's registration.
    pub region_code: String,
    /// Owner personal identification number, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_pinfl: Option<String>,
}

/// NEO-specific request fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeoPayload {
    /// NEO region identifier.
    pub region_id: u32,
}

/// Provider-specific request fields, tagged by provider.
///
/// Gross has no mapped fields yet, so its payload is an opaque JSON object
/// that is passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum ProviderPayload {
    /// Euroasia fields.
    Euroasia(EuroasiaPayload),
    /// NEO fields.
    Neo(NeoPayload),
    /// Gross fields, schema owned by the provider.
    Gross {
        /// Opaque provider fields.
        #[serde(default)]
        fields: serde_json::Value,
    },
}

impl ProviderPayload {
    /// Returns the provider this payload belongs to.
    #[must_use]
    pub fn provider(&self) -> ProviderId {
        match self {
            Self::Euroasia(_) => ProviderId::Euroasia,
            Self::Neo(_) => ProviderId::Neo,
            Self::Gross { .. } => ProviderId::Gross,
        }
    }

    fn validate(&self) -> DomainResult<()> {
        match self {
            Self::Euroasia(payload) if payload.region_code.trim().is_empty() => {
                Err(DomainError::MissingField("payloads.euroasia.region_code"))
            }
            Self::Gross { fields } if !(fields.is_object() || fields.is_null()) => Err(
                DomainError::invalid_field("payloads.gross.fields", "must be a JSON object"),
            ),
            _ => Ok(()),
        }
    }
}

/// Provider-agnostic OSAGO premium request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Vehicle being insured.
    pub vehicle: VehicleIdentity,
    /// Insurance period in months.
    pub period_months: u8,
    /// Driver policy.
    pub driver_policy: DriverPolicy,
    /// Locale of human-readable response text.
    #[serde(default)]
    pub locale: Locale,
    /// Provider-specific payloads, at most one per provider.
    #[serde(default)]
    pub payloads: Vec<ProviderPayload>,
}

impl QuoteRequest {
    /// Creates a request without provider payloads.
    #[must_use]
    pub fn new(vehicle: VehicleIdentity, period_months: u8, driver_policy: DriverPolicy) -> Self {
        Self {
            vehicle,
            period_months,
            driver_policy,
            locale: Locale::default(),
            payloads: Vec::new(),
        }
    }

    /// Adds a provider payload.
    #[must_use]
    pub fn with_payload(mut self, payload: ProviderPayload) -> Self {
        self.payloads.push(payload);
        self
    }

    /// Sets the locale.
    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Returns the payload addressed to `provider`, if any.
    #[must_use]
    pub fn payload_for(&self, provider: ProviderId) -> Option<&ProviderPayload> {
        self.payloads.iter().find(|p| p.provider() == provider)
    }

    /// Validates the cross-provider fields and every supplied payload.
    ///
    /// # Errors
    ///
    /// Returns the first [`DomainError`] found.
    pub fn validate(&self) -> DomainResult<()> {
        self.vehicle.validate()?;
        if !(1..=MAX_PERIOD_MONTHS).contains(&self.period_months) {
            return Err(DomainError::invalid_field(
                "period_months",
                format!("must be between 1 and {}", MAX_PERIOD_MONTHS),
            ));
        }
        self.driver_policy.validate()?;

        for (index, payload) in self.payloads.iter().enumerate() {
            payload.validate()?;
            let duplicate = self
                .payloads
                .iter()
                .skip(index + 1)
                .any(|other| other.provider() == payload.provider());
            if duplicate {
                return Err(DomainError::invalid_field(
                    "payloads",
                    format!("more than one payload for {}", payload.provider()),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_request() -> QuoteRequest {
        QuoteRequest::new(
            VehicleIdentity::new("01A123BC", "AAF", "1234567").with_group_id("G-7"),
            12,
            DriverPolicy::Limited { count: 2 },
        )
    }

    #[test]
    fn valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn blank_gov_number_is_rejected() {
        let mut request = valid_request();
        request.vehicle.gov_number = "  ".to_string();
        assert_eq!(
            request.validate(),
            Err(DomainError::MissingField("vehicle.gov_number"))
        );
    }

    #[test]
    fn period_out_of_range_is_rejected() {
        let mut request = valid_request();
        request.period_months = 0;
        assert_eq!(request.validate().unwrap_err().field(), "period_months");
        request.period_months = 13;
        assert_eq!(request.validate().unwrap_err().field(), "period_months");
    }

    #[test]
    fn limited_driver_count_is_bounded() {
        let mut request = valid_request();
        request.driver_policy = DriverPolicy::Limited { count: 6 };
        assert_eq!(request.validate().unwrap_err().field(), "driver_policy.count");
    }

    #[test]
    fn duplicate_payloads_are_rejected() {
        let request = valid_request()
            .with_payload(ProviderPayload::Neo(NeoPayload { region_id: 1 }))
            .with_payload(ProviderPayload::Neo(NeoPayload { region_id: 2 }));
        assert_eq!(request.validate().unwrap_err().field(), "payloads");
    }

    #[test]
    fn payload_for_only_returns_own_payload() {
        let request = valid_request().with_payload(ProviderPayload::Neo(NeoPayload { region_id: 10 }));
        assert!(request.payload_for(ProviderId::Neo).is_some());
        assert!(request.payload_for(ProviderId::Euroasia).is_none());
    }

    #[test]
    fn deserializes_tagged_payloads() {
        let json = serde_json::json!({
            "vehicle": {
                "gov_number": "01A123BC",
                "tech_passport_series": "AAF",
                "tech_passport_number": "1234567",
                "group_id": "G-7"
            },
            "period_months": 6,
            "driver_policy": { "type": "unlimited" },
            "locale": "ru",
            "payloads": [
                { "provider": "euroasia", "region_code": "10" },
                { "provider": "gross", "fields": { "anything": true } }
            ]
        });

        let request: QuoteRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.locale, Locale::Ru);
        assert!(request.driver_policy.is_unlimited());
        assert!(matches!(
            request.payload_for(ProviderId::Gross),
            Some(ProviderPayload::Gross { .. })
        ));
        assert!(request.validate().is_ok());
    }
}
