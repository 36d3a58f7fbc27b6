//! The top-level client.
//!
//! [`Client`] owns the transport (and through it the API key) and hands out
//! one lightweight resource client per API family. Use [`ClientBuilder`] to
//! configure it.

use crate::{
    resources::{
        disbursements::Disbursements, ewallet_accounts::EwalletAccounts, invoices::Invoices,
        orders::Orders, payments::Payments, promos::Promos, refunds::Refunds,
        settlements::Settlements, virtual_accounts::VirtualAccounts,
    },
    transport::{Api, ApiKey, HttpTransport},
    Error, Result,
};
use http::{HeaderMap, HeaderName, HeaderValue};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// The API origin used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.durianpay.id";

/// Environment variable read by [`Client::from_env`] for the API key.
pub const API_KEY_ENV: &str = "DURIANPAY_API_KEY";

/// Environment variable read by [`Client::from_env`] for the base URL.
pub const BASE_URL_ENV: &str = "DURIANPAY_BASE_URL";

/// A Durianpay API client.
///
/// The client is cheap to clone and safe to share between tasks: the API
/// key, base URL and connection pool are immutable after construction.
///
/// # Examples
///
/// ```no_run
/// use durianpay::Client;
/// use durianpay::resources::orders::FetchOrdersOptions;
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), durianpay::Error> {
/// let client = Client::builder()
///     .api_key("dp_test_XXXXXXXX")
///     .timeout(Duration::from_secs(30))
///     .build()?;
///
/// let orders = client
///     .orders()
///     .fetch(&FetchOrdersOptions {
///         limit: Some(10),
///         ..Default::default()
///     })
///     .await?;
/// println!("{} orders in total", orders.total);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    api: Arc<dyn Api>,
}

impl Client {
    /// Creates a client with the default base URL and HTTP settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty or the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Creates a client from `DURIANPAY_API_KEY` and, optionally,
    /// `DURIANPAY_BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the key variable is not set.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| Error::Configuration(format!("{} is not set", API_KEY_ENV)))?;

        let mut builder = Self::builder().api_key(api_key);
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            builder = builder.base_url(base_url)?;
        }
        builder.build()
    }

    /// Creates a new `ClientBuilder` for configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Creates a client on top of a custom [`Api`] implementation.
    ///
    /// Mostly useful for substituting a test double for the HTTP transport.
    pub fn with_api(api: Arc<dyn Api>) -> Self {
        Self { api }
    }

    /// Returns the underlying transport.
    pub fn api(&self) -> Arc<dyn Api> {
        Arc::clone(&self.api)
    }

    /// Disbursement operations.
    pub fn disbursements(&self) -> Disbursements {
        Disbursements::new(self.api())
    }

    /// Order operations.
    pub fn orders(&self) -> Orders {
        Orders::new(self.api())
    }

    /// Payment operations.
    pub fn payments(&self) -> Payments {
        Payments::new(self.api())
    }

    /// Invoice operations.
    pub fn invoices(&self) -> Invoices {
        Invoices::new(self.api())
    }

    /// Promo operations.
    pub fn promos(&self) -> Promos {
        Promos::new(self.api())
    }

    /// Refund operations.
    pub fn refunds(&self) -> Refunds {
        Refunds::new(self.api())
    }

    /// Settlement operations.
    pub fn settlements(&self) -> Settlements {
        Settlements::new(self.api())
    }

    /// Static virtual account operations.
    pub fn virtual_accounts(&self) -> VirtualAccounts {
        VirtualAccounts::new(self.api())
    }

    /// E-wallet account linking operations.
    pub fn ewallet_accounts(&self) -> EwalletAccounts {
        EwalletAccounts::new(self.api())
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").finish_non_exhaustive()
    }
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use durianpay::ClientBuilder;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), durianpay::Error> {
/// let client = ClientBuilder::new()
///     .api_key("dp_test_XXXXXXXX")
///     .base_url("https://api.durianpay.id")?
///     .timeout(Duration::from_secs(30))
///     .default_header("User-Agent", "my-shop/1.0")?
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    api_key: Option<String>,
    base_url: Option<Url>,
    default_headers: HeaderMap,
    timeout: Option<Duration>,
    http_client: Option<reqwest::Client>,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: None,
            default_headers: HeaderMap::new(),
            timeout: None,
            http_client: None,
        }
    }

    /// Sets the secret API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Overrides the API origin (defaults to [`DEFAULT_BASE_URL`]).
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        self.base_url = Some(Url::parse(url.as_ref())?);
        Ok(self)
    }

    /// Adds a default header that will be included in all requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::Configuration(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::Configuration(format!("Invalid header value: {}", e)))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Uses an existing `reqwest::Client` instead of creating one.
    pub fn http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key was provided or if the HTTP client
    /// cannot be built.
    pub fn build(self) -> Result<Client> {
        let api_key = self
            .api_key
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::Configuration("API key is required".to_string()))?;

        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };

        let http_client = match self.http_client {
            Some(client) => client,
            None => reqwest::Client::builder().build().map_err(|e| {
                Error::Configuration(format!("Failed to build HTTP client: {}", e))
            })?,
        };

        let transport = HttpTransport::new(http_client, base_url, ApiKey::new(api_key))
            .with_default_headers(self.default_headers)
            .with_timeout(self.timeout);

        Ok(Client::with_api(Arc::new(transport)))
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_requires_api_key() {
        let result = Client::builder().build();
        assert!(matches!(result, Err(Error::Configuration(_))));

        let result = Client::builder().api_key("").build();
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_invalid_base_url() {
        let result = Client::builder().base_url("not a url");
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_invalid_default_header() {
        let result = Client::builder().default_header("bad header", "value");
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_build_with_defaults() {
        assert!(Client::new("dp_test_key").is_ok());
    }
}
