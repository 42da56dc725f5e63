//! # HTTP Client
//!
//! Shared JSON-over-HTTP client for provider adapters, the translation
//! backend and the partner offering feed.
//!
//! Every call has the client-level timeout; non-2xx responses and malformed
//! bodies are mapped to [`UpstreamError`]. Nothing is retried.
//!
//! # Examples
//!
//! ```ignore
//! use partner_hub::infrastructure::http::HttpClient;
//!
//! let client = HttpClient::new(5000)?;
//! let groups: Envelope<Vec<Group>> = client.get("https://partner.example/api/groups").await?;
//! ```

use crate::infrastructure::http::error::{UpstreamError, UpstreamResult};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Longest upstream error body kept in an error message.
const MAX_ERROR_BODY_CHARS: usize = 512;

/// HTTP client wrapper used by every outbound integration.
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// Inner reqwest client.
    client: Client,
    /// Request timeout in milliseconds.
    timeout_ms: u64,
}

impl HttpClient {
    /// Creates a new HTTP client with the specified timeout.
    ///
    /// # Errors
    ///
    /// Returns `UpstreamError::Internal` if the client cannot be created.
    pub fn new(timeout_ms: u64) -> UpstreamResult<Self> {
        Self::with_headers(timeout_ms, HeaderMap::new())
    }

    /// Creates a new HTTP client that sends `default_headers` on every
    /// request.
    ///
    /// # Errors
    ///
    /// Returns `UpstreamError::Internal` if the client cannot be created.
    pub fn with_headers(timeout_ms: u64, default_headers: HeaderMap) -> UpstreamResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .default_headers(default_headers)
            .build()
            .map_err(|e| UpstreamError::internal(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, timeout_ms })
    }

    /// Returns the configured timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Makes a GET request and deserializes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an `UpstreamError` on transport failure, non-2xx status or
    /// an unparsable body.
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> UpstreamResult<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Makes a GET request with query parameters.
    ///
    /// # Errors
    ///
    /// Returns an `UpstreamError` on transport failure, non-2xx status or
    /// an unparsable body.
    pub async fn get_with_params<T: DeserializeOwned, P: Serialize + ?Sized>(
        &self,
        url: &str,
        params: &P,
    ) -> UpstreamResult<T> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Makes a POST request with a JSON body and deserializes the JSON
    /// response.
    ///
    /// # Errors
    ///
    /// Returns an `UpstreamError` on transport failure, non-2xx status or
    /// an unparsable body.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> UpstreamResult<T> {
        self.post_with_headers(url, body, HeaderMap::new()).await
    }

    /// Makes a POST request with a JSON body and extra headers.
    ///
    /// # Errors
    ///
    /// Returns an `UpstreamError` on transport failure, non-2xx status or
    /// an unparsable body.
    pub async fn post_with_headers<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        headers: HeaderMap,
    ) -> UpstreamResult<T> {
        let response = self
            .client
            .post(url)
            .headers(headers)
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Makes a POST request with a JSON body and query parameters.
    ///
    /// # Errors
    ///
    /// Returns an `UpstreamError` on transport failure, non-2xx status or
    /// an unparsable body.
    pub async fn post_with_params<T, B, P>(
        &self,
        url: &str,
        params: &P,
        body: &B,
    ) -> UpstreamResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
        P: Serialize + ?Sized,
    {
        let response = self
            .client
            .post(url)
            .query(params)
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Handles the HTTP response, checking status and deserializing JSON.
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> UpstreamResult<T> {
        let status = response.status();

        if status.is_success() {
            let bytes = response
                .bytes()
                .await
                .map_err(|e| self.map_reqwest_error(e))?;
            serde_json::from_slice(&bytes)
                .map_err(|e| UpstreamError::parse(format!("failed to parse response: {e}")))
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(self.map_status_error(status, &body))
        }
    }

    /// Maps a reqwest error to an `UpstreamError`.
    fn map_reqwest_error(&self, error: reqwest::Error) -> UpstreamError {
        if error.is_timeout() {
            UpstreamError::timeout_with_duration("request timed out", self.timeout_ms)
        } else if error.is_connect() {
            UpstreamError::connection(format!("connection failed: {error}"))
        } else if error.is_decode() {
            UpstreamError::parse(format!("failed to read response: {error}"))
        } else {
            UpstreamError::connection(format!("HTTP request failed: {error}"))
        }
    }

    /// Maps a non-2xx status to an `UpstreamError`.
    fn map_status_error(&self, status: StatusCode, body: &str) -> UpstreamError {
        let body: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                UpstreamError::authentication(status.as_u16(), body)
            }
            StatusCode::TOO_MANY_REQUESTS => UpstreamError::rate_limited("rate limit exceeded"),
            _ => UpstreamError::status(status.as_u16(), body),
        }
    }
}

/// Builds a header map holding a single header.
///
/// # Errors
///
/// Returns `UpstreamError::Internal` if the value is not a valid header.
pub fn single_header(name: HeaderName, value: &str) -> UpstreamResult<HeaderMap> {
    let value = HeaderValue::from_str(value)
        .map_err(|e| UpstreamError::internal(format!("invalid {name} header: {e}")))?;
    let mut headers = HeaderMap::new();
    headers.insert(name, value);
    Ok(headers)
}

/// Builds an `Authorization: Bearer` header map.
///
/// # Errors
///
/// Returns `UpstreamError::Internal` if the token is not a valid header.
pub fn bearer(token: &str) -> UpstreamResult<HeaderMap> {
    single_header(AUTHORIZATION, &format!("Bearer {token}"))
}
