//! Error types for Durianpay API calls.
//!
//! Every failure path in the crate converges on [`Error`]. Callers that only
//! need the normalized shape can use [`Error::message`], [`Error::error_code`]
//! and [`Error::status`]; callers that want details can match on the variants.
//!
//! There are two provenances:
//!
//! * **SDK errors** raised inside the client (serialization, network, body
//!   read, an error body that is not JSON, bad configuration). They carry the
//!   fixed code [`SDK_INTERNAL_ERROR`] and no HTTP status.
//! * **API errors** raised when the server answers with a status other than
//!   `200` and a body shaped like [`ApiErrorBody`]. They carry the status and
//!   the server's message and code verbatim.

use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Error code attached to every error raised inside the client itself.
pub const SDK_INTERNAL_ERROR: &str = "SDK_INTERNAL_ERROR";

/// The main error type for Durianpay API calls.
///
/// # Examples
///
/// ```no_run
/// use durianpay::{Client, Error};
/// use durianpay::resources::disbursements::ValidateDisbursementPayload;
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::new("dp_test_XXXXXXXX")?;
/// let payload = ValidateDisbursementPayload {
///     idempotency_key: "1".to_string(),
///     account_number: "123".to_string(),
///     bank_code: "bca".to_string(),
/// };
///
/// match client.disbursements().validate(&payload).await {
///     Ok(validation) => println!("Status: {}", validation.status),
///     Err(Error::Api { status, error_code, message, .. }) => {
///         eprintln!("API rejected the call ({status}): {error_code} {message}");
///     }
///     Err(e) => eprintln!("SDK error [{}]: {}", e.error_code(), e.message()),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A network-level error occurred (connection failed, DNS lookup failed,
    /// timeout, or the response body could not be read).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The request payload could not be serialized to JSON. No I/O happened.
    #[error("Failed to serialize request: {0}")]
    Serialization(String),

    /// The server answered with a non-200 status and a well-formed error body.
    ///
    /// # Fields
    ///
    /// * `status` - The HTTP status code
    /// * `message` - The server-supplied message
    /// * `error_code` - The server-supplied error code (e.g. `DPAY_INTERNAL_ERROR`)
    /// * `details` - Per-field errors, when the server sends them
    #[error("API error {status} [{error_code}]: {message}")]
    Api {
        /// The HTTP status code
        status: StatusCode,
        /// The server-supplied message
        message: String,
        /// The server-supplied error code
        error_code: String,
        /// Per-field validation errors
        details: Vec<FieldError>,
    },

    /// The server answered with a non-200 status and a body that does not
    /// match the error schema.
    #[error("Failed to parse error response: {serde_error}")]
    MalformedErrorBody {
        /// The raw response body
        raw_response: String,
        /// The serde error message
        serde_error: String,
    },

    /// A `200` body could not be decoded into the operation's response type.
    ///
    /// This points at a mismatch between the response type and the API, not
    /// at a transport problem, so it is kept apart from the other SDK errors.
    #[error("Failed to deserialize response (status {status}): {serde_error}")]
    Deserialization {
        /// The raw response body that failed to deserialize
        raw_response: String,
        /// The serde error message
        serde_error: String,
        /// The HTTP status code
        status: StatusCode,
    },

    /// Invalid configuration was provided (missing API key, bad header...).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An invalid URL was provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// The error body returned by the API on failure.
///
/// ```json
/// {"error": "error reading request body", "error_code": "DPAY_INTERNAL_ERROR"}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
    pub error_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

/// A single field-level validation error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldError {
    pub code: String,
    pub field: String,
    pub message: String,
}

impl Error {
    /// Builds the error for a non-200 response from its raw body.
    ///
    /// Falls back to [`Error::MalformedErrorBody`] when the body is not the
    /// documented error shape.
    pub fn from_response_body(status: StatusCode, raw_response: String) -> Self {
        match serde_json::from_str::<ApiErrorBody>(&raw_response) {
            Ok(body) => {
                let message = match body.message {
                    Some(message) if body.error.is_empty() => message,
                    _ => body.error,
                };
                Error::Api {
                    status,
                    message,
                    error_code: body.error_code,
                    details: body.errors,
                }
            }
            Err(e) => Error::MalformedErrorBody {
                raw_response,
                serde_error: e.to_string(),
            },
        }
    }

    /// Returns `true` if the error was raised by the server rather than the client.
    pub fn is_api_error(&self) -> bool {
        matches!(self, Error::Api { .. })
    }

    /// Returns the error code: the server's code for API errors,
    /// [`SDK_INTERNAL_ERROR`] for everything else.
    ///
    /// ```
    /// use durianpay::{Error, SDK_INTERNAL_ERROR};
    ///
    /// let err = Error::Configuration("API key is required".to_string());
    /// assert_eq!(err.error_code(), SDK_INTERNAL_ERROR);
    /// assert_eq!(err.status(), None);
    /// ```
    pub fn error_code(&self) -> &str {
        match self {
            Error::Api { error_code, .. } => error_code,
            _ => SDK_INTERNAL_ERROR,
        }
    }

    /// Returns a human-readable message.
    ///
    /// For API errors this is the server-supplied message verbatim.
    pub fn message(&self) -> String {
        match self {
            Error::Api { message, .. } => message.clone(),
            Error::Network(e) => e.to_string(),
            Error::Serialization(msg) | Error::Configuration(msg) => msg.clone(),
            Error::MalformedErrorBody { serde_error, .. }
            | Error::Deserialization { serde_error, .. } => serde_error.clone(),
            Error::InvalidUrl(e) => e.to_string(),
        }
    }

    /// Returns the HTTP status code if this error has one.
    ///
    /// Only [`Error::Api`] and [`Error::Deserialization`] carry a status.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Deserialization { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw response body if this error has one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::MalformedErrorBody { raw_response, .. } => Some(raw_response),
            Error::Deserialization { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }
}

/// A specialized `Result` type for Durianpay API calls.
pub type Result<T> = std::result::Result<T, Error>;
