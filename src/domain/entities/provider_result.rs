//! # Provider Results
//!
//! Per-provider outcomes and the envelope that carries them.
//!
//! A [`ProviderResult`] is either a success with normalized premium data and
//! the raw upstream payload, or a failure with a human-readable reason and the
//! HTTP status that a single-provider endpoint would mirror. Exactly one of
//! the two is ever populated, which the [`ProviderOutcome`] sum type enforces.
//!
//! On the wire a result is flattened to:
//!
//! ```text
//! { "provider": "neo", "success": false, "status": 404, "message": "..." }
//! { "provider": "euroasia", "success": true, "status": 200, "data": {...}, "raw": {...} }
//! ```

use crate::domain::value_objects::ProviderId;
use rust_decimal::Decimal;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Currency of every OSAGO premium.
pub const PREMIUM_CURRENCY: &str = "UZS";

/// Normalized premium returned by a successful provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotePremium {
    /// Premium to pay.
    #[serde(with = "rust_decimal::serde::str")]
    pub premium: Decimal,
    /// Insured amount, when the provider reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(with = "rust_decimal::serde::str_option")]
    pub insurance_sum: Option<Decimal>,
    /// Premium currency.
    pub currency: String,
    /// Insurance period in months.
    pub period_months: u8,
}

impl QuotePremium {
    /// Creates a premium in the default currency.
    #[must_use]
    pub fn new(premium: Decimal, insurance_sum: Option<Decimal>, period_months: u8) -> Self {
        Self {
            premium,
            insurance_sum,
            currency: PREMIUM_CURRENCY.to_string(),
            period_months,
        }
    }
}

/// Why a provider did not produce a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureKind {
    /// The request lacked fields this provider needs.
    InvalidPayload,
    /// A reference lookup found no matching entry.
    NotFound,
    /// Transport failure or non-success upstream response.
    Upstream,
    /// Upstream answered with a body that could not be parsed.
    Parse,
    /// The provider did not answer within its budget.
    Timeout,
    /// The provider is known but its integration is not wired up.
    NotImplemented,
    /// The provider has no credentials configured.
    ConfigMissing,
}

impl FailureKind {
    /// Returns the HTTP status a single-provider endpoint mirrors.
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::InvalidPayload => 400,
            Self::NotFound => 404,
            Self::Upstream | Self::Parse => 502,
            Self::Timeout => 504,
            Self::NotImplemented | Self::ConfigMissing => 501,
        }
    }

    /// Returns true if the failure was decided locally, without network I/O.
    #[must_use]
    pub const fn is_structural(self) -> bool {
        matches!(
            self,
            Self::NotImplemented | Self::ConfigMissing | Self::InvalidPayload
        )
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidPayload => "INVALID_PAYLOAD",
            Self::NotFound => "NOT_FOUND",
            Self::Upstream => "UPSTREAM",
            Self::Parse => "PARSE",
            Self::Timeout => "TIMEOUT",
            Self::NotImplemented => "NOT_IMPLEMENTED",
            Self::ConfigMissing => "CONFIG_MISSING",
        };
        f.write_str(name)
    }
}

/// Outcome of one provider call.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderOutcome {
    /// The provider priced the request.
    Success {
        /// Normalized premium.
        data: QuotePremium,
        /// Upstream response body as received.
        raw: serde_json::Value,
    },
    /// The provider did not price the request.
    Failure {
        /// Human-readable cause.
        reason: String,
        /// Failure classification.
        kind: FailureKind,
        /// Effective HTTP status.
        status: u16,
    },
}

/// Result of one provider for one aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResult {
    provider: ProviderId,
    outcome: ProviderOutcome,
}

impl ProviderResult {
    /// Creates a successful result.
    #[must_use]
    pub fn success(provider: ProviderId, data: QuotePremium, raw: serde_json::Value) -> Self {
        Self {
            provider,
            outcome: ProviderOutcome::Success { data, raw },
        }
    }

    /// Creates a failed result with the kind's default status.
    #[must_use]
    pub fn failure(provider: ProviderId, kind: FailureKind, reason: impl Into<String>) -> Self {
        Self::failure_with_status(provider, kind, kind.http_status(), reason)
    }

    /// Creates a failed result carrying an explicit upstream status.
    #[must_use]
    pub fn failure_with_status(
        provider: ProviderId,
        kind: FailureKind,
        status: u16,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            outcome: ProviderOutcome::Failure {
                reason: reason.into(),
                kind,
                status,
            },
        }
    }

    /// Returns the provider.
    #[inline]
    #[must_use]
    pub fn provider(&self) -> ProviderId {
        self.provider
    }

    /// Returns the outcome.
    #[inline]
    #[must_use]
    pub fn outcome(&self) -> &ProviderOutcome {
        &self.outcome
    }

    /// Returns true if the provider priced the request.
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ProviderOutcome::Success { .. })
    }

    /// Returns the premium data of a successful result.
    #[must_use]
    pub fn data(&self) -> Option<&QuotePremium> {
        match &self.outcome {
            ProviderOutcome::Success { data, .. } => Some(data),
            ProviderOutcome::Failure { .. } => None,
        }
    }

    /// Returns the failure reason of a failed result.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match &self.outcome {
            ProviderOutcome::Success { .. } => None,
            ProviderOutcome::Failure { reason, .. } => Some(reason),
        }
    }

    /// Returns the failure kind of a failed result.
    #[must_use]
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match &self.outcome {
            ProviderOutcome::Success { .. } => None,
            ProviderOutcome::Failure { kind, .. } => Some(*kind),
        }
    }

    /// Returns the effective HTTP status of this result.
    #[must_use]
    pub fn status(&self) -> u16 {
        match &self.outcome {
            ProviderOutcome::Success { .. } => 200,
            ProviderOutcome::Failure { status, .. } => *status,
        }
    }
}

impl Serialize for ProviderResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.outcome {
            ProviderOutcome::Success { data, raw } => {
                let mut state = serializer.serialize_struct("ProviderResult", 5)?;
                state.serialize_field("provider", &self.provider)?;
                state.serialize_field("success", &true)?;
                state.serialize_field("status", &200u16)?;
                state.serialize_field("data", data)?;
                state.serialize_field("raw", raw)?;
                state.end()
            }
            ProviderOutcome::Failure {
                reason,
                kind,
                status,
            } => {
                let mut state = serializer.serialize_struct("ProviderResult", 5)?;
                state.serialize_field("provider", &self.provider)?;
                state.serialize_field("success", &false)?;
                state.serialize_field("status", status)?;
                state.serialize_field("error", kind)?;
                state.serialize_field("message", reason)?;
                state.end()
            }
        }
    }
}

impl fmt::Display for ProviderResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            ProviderOutcome::Success { data, .. } => {
                write!(f, "{}: {} {}", self.provider, data.premium, data.currency)
            }
            ProviderOutcome::Failure { reason, status, .. } => {
                write!(f, "{}: failed ({}) {}", self.provider, status, reason)
            }
        }
    }
}

/// Envelope with one result per configured provider.
///
/// `success` means the request was structurally valid and every provider
/// was attempted; per-provider success lives in each result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedQuote {
    /// The request passed validation.
    pub success: bool,
    /// Results in configured provider order.
    pub results: Vec<ProviderResult>,
}

impl AggregatedQuote {
    /// Creates an envelope for a validated request.
    #[must_use]
    pub fn new(results: Vec<ProviderResult>) -> Self {
        Self {
            success: true,
            results,
        }
    }

    /// Returns the result for `provider`, if it was configured.
    #[must_use]
    pub fn get(&self, provider: ProviderId) -> Option<&ProviderResult> {
        self.results.iter().find(|r| r.provider() == provider)
    }

    /// Returns the number of providers that priced the request.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    /// Returns the cheapest successful result.
    #[must_use]
    pub fn cheapest(&self) -> Option<&ProviderResult> {
        self.results
            .iter()
            .filter_map(|r| r.data().map(|d| (r, d.premium)))
            .min_by(|a, b| a.1.cmp(&b.1))
            .map(|(r, _)| r)
    }
}
