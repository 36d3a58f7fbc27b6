//! The request/response transport shared by every resource client.
//!
//! [`Api`] is the capability the resource clients depend on. The real
//! implementation, [`HttpTransport`], performs exactly one HTTP round trip
//! per call and normalizes the outcome:
//!
//! * status `200` → the raw body in a [`Response<String>`]
//! * any other status → [`Error::Api`], or [`Error::MalformedErrorBody`] if
//!   the body is not the documented error shape
//! * connection, timeout or body-read failures → [`Error::Network`]
//!
//! Nothing is retried. Dropping the returned future abandons the request.

use crate::{metadata::RequestMetadata, Error, Response, Result};
use async_trait::async_trait;
use base64::Engine;
use http::{header, HeaderMap, HeaderValue, StatusCode};
use std::fmt;
use std::time::{Duration, Instant};
use url::Url;

/// Header carrying the per-operation idempotency key.
pub const IDEMPOTENCY_KEY_HEADER: &str = "X-Idempotency-Key";

/// Performs one API request.
///
/// Implemented by [`HttpTransport`] and by test doubles. Implementations
/// must return `Ok` only for a `200` answer.
#[async_trait]
pub trait Api: Send + Sync {
    /// Sends the request and returns the raw body of a successful response.
    async fn request(&self, metadata: RequestMetadata) -> Result<Response<String>>;
}

/// The secret API key used to authenticate every request.
///
/// The key never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a raw key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the value of the `Authorization` header: `Basic base64(key + ":")`.
    ///
    /// ```
    /// use durianpay::transport::ApiKey;
    ///
    /// let key = ApiKey::new("dp_test_123");
    /// assert_eq!(key.basic_auth(), "Basic ZHBfdGVzdF8xMjM6");
    /// ```
    pub fn basic_auth(&self) -> String {
        let encoded =
            base64::engine::general_purpose::STANDARD.encode(format!("{}:", self.0).as_bytes());
        format!("Basic {}", encoded)
    }

    /// Returns the raw key.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// The reqwest-backed [`Api`] implementation.
///
/// Usually built through [`ClientBuilder`](crate::ClientBuilder); all fields
/// are immutable after construction so one transport can serve concurrent
/// calls.
#[derive(Debug)]
pub struct HttpTransport {
    http_client: reqwest::Client,
    base_url: Url,
    api_key: ApiKey,
    default_headers: HeaderMap,
    timeout: Option<Duration>,
}

impl HttpTransport {
    /// Creates a transport sending to `base_url` with the given credential.
    pub fn new(http_client: reqwest::Client, base_url: Url, api_key: ApiKey) -> Self {
        Self {
            http_client,
            base_url,
            api_key,
            default_headers: HeaderMap::new(),
            timeout: None,
        }
    }

    /// Adds headers sent with every request.
    pub fn with_default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = headers;
        self
    }

    /// Sets a per-request timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn build_url(&self, metadata: &RequestMetadata) -> Url {
        let mut url = self.base_url.clone();
        let base_path = self.base_url.path().trim_end_matches('/');
        url.set_path(&format!("{}{}", base_path, metadata.path));

        if !metadata.query_params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &metadata.query_params {
                pairs.append_pair(key, value);
            }
        }

        url
    }

    /// Fixed headers first, then default headers, then the request's own.
    /// A later header replaces an earlier one with the same name.
    fn request_headers(&self, metadata: &RequestMetadata) -> Result<HeaderMap> {
        let idempotency_key = HeaderValue::try_from(metadata.idempotency_key.as_str())
            .map_err(|e| Error::Configuration(format!("Invalid idempotency key: {}", e)))?;
        let authorization = HeaderValue::try_from(self.api_key.basic_auth())
            .map_err(|e| Error::Configuration(format!("Invalid API key: {}", e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(header::AUTHORIZATION, authorization);
        headers.insert(IDEMPOTENCY_KEY_HEADER, idempotency_key);
        headers.extend(self.default_headers.clone());
        headers.extend(metadata.headers.clone());

        Ok(headers)
    }

    async fn execute_request(&self, metadata: &RequestMetadata) -> Result<reqwest::Response> {
        let url = self.build_url(metadata);

        tracing::debug!(
            method = %metadata.method,
            url = %url,
            idempotency_key = %metadata.idempotency_key,
            "Executing HTTP request"
        );

        let mut request = self
            .http_client
            .request(metadata.method.clone(), url)
            .headers(self.request_headers(metadata)?);

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        if let Some(body) = &metadata.body {
            request = request.body(body.clone());
        }

        let response = request.send().await?;

        Ok(response)
    }

    async fn parse_response(
        &self,
        response: reqwest::Response,
        started: Instant,
    ) -> Result<Response<String>> {
        let status = response.status();
        let headers = response.headers().clone();
        let raw_body = response.text().await?;
        let latency = started.elapsed();

        tracing::info!(
            status = status.as_u16(),
            latency_ms = latency.as_millis(),
            "Received HTTP response"
        );

        if status != StatusCode::OK {
            if status.is_server_error() {
                tracing::warn!(
                    status = status.as_u16(),
                    response = %raw_body,
                    "Server error (5xx)"
                );
            } else {
                tracing::error!(
                    status = status.as_u16(),
                    response = %raw_body,
                    "Request rejected"
                );
            }

            return Err(Error::from_response_body(status, raw_body));
        }

        Ok(Response::new(raw_body, status, headers, latency))
    }
}

#[async_trait]
impl Api for HttpTransport {
    async fn request(&self, metadata: RequestMetadata) -> Result<Response<String>> {
        let started = Instant::now();

        let result = match self.execute_request(&metadata).await {
            Ok(response) => self.parse_response(response, started).await,
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            tracing::warn!(
                error = %e,
                method = %metadata.method,
                path = %metadata.path,
                "Request failed"
            );
        }

        result
    }
}
