//! # HTTP Translation Backend
//!
//! Google-v2 style JSON API:
//!
//! ```text
//! POST {base_url}?key={api_key}
//! { "q": "...", "source": "uz", "target": "ru", "format": "text" }
//!
//! { "data": { "translations": [ { "translatedText": "..." } ] } }
//! ```
//!
//! Only `ru` and `en` are translated externally.

use crate::domain::value_objects::Locale;
use crate::infrastructure::http::HttpClient;
use crate::infrastructure::translation::config::TranslationConfig;
use crate::infrastructure::translation::error::{TranslationError, TranslationResult};
use crate::infrastructure::translation::traits::TranslationBackend;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'static str,
    target: &'static str,
    format: &'static str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

/// Translation backend over HTTP.
#[derive(Debug)]
pub struct HttpTranslationBackend {
    client: HttpClient,
    base_url: String,
    api_key: Option<String>,
}

impl HttpTranslationBackend {
    /// Creates a backend from configuration. Without an API key every call
    /// fails with `TranslationError::NotConfigured`.
    ///
    /// # Errors
    ///
    /// Returns `TranslationError::Upstream` if the HTTP client cannot be built.
    pub fn from_config(config: &TranslationConfig) -> TranslationResult<Self> {
        Ok(Self {
            client: HttpClient::new(config.timeout_ms)?,
            base_url: config.base_url.clone(),
            api_key: config.api_key().map(str::to_string),
        })
    }

    /// Returns true if an API key is configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl TranslationBackend for HttpTranslationBackend {
    async fn translate(&self, text: &str, target: Locale) -> TranslationResult<String> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(TranslationError::NotConfigured);
        };
        if !target.is_externally_translated() {
            return Err(TranslationError::unsupported_locale(target.code()));
        }

        let body = TranslateRequest {
            q: text,
            source: Locale::Uz.code(),
            target: target.code(),
            format: "text",
        };
        let response: TranslateResponse = self
            .client
            .post_with_params(&self.base_url, &[("key", api_key)], &body)
            .await?;

        response
            .data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(TranslationError::EmptyResponse)
    }
}
