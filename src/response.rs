//! Successful responses and their decoding.
//!
//! An [`Api`](crate::transport::Api) implementation returns a
//! `Response<String>` holding the raw body of a `200` answer. Resource
//! clients then decode it with either [`Response::into_data`] (for endpoints
//! that wrap their payload in a `{"data": ...}` envelope) or
//! [`Response::into_json`] (for endpoints that return it at the top level).

use crate::{Error, Result};
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// A wrapper around a successful HTTP response.
///
/// # Examples
///
/// ```
/// # use durianpay::Response;
/// # use http::{HeaderMap, StatusCode};
/// # use std::time::Duration;
/// let raw = Response::new(
///     r#"{"data":{"balance":"150000"}}"#.to_string(),
///     StatusCode::OK,
///     HeaderMap::new(),
///     Duration::from_millis(40),
/// );
///
/// let balance: Response<serde_json::Value> = raw.into_data().unwrap();
/// assert_eq!(balance.data["balance"], "150000");
/// ```
#[derive(Debug, Clone)]
pub struct Response<T> {
    /// The response data: the raw body for `Response<String>`, the decoded
    /// value after [`into_data`](Response::into_data) or
    /// [`into_json`](Response::into_json).
    pub data: T,

    /// The HTTP status code of the response.
    pub status: StatusCode,

    /// The response headers.
    pub headers: HeaderMap,

    /// Time from sending the request until the body was read.
    pub latency: Duration,
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

impl<T> Response<T> {
    /// Creates a new `Response`.
    pub fn new(data: T, status: StatusCode, headers: HeaderMap, latency: Duration) -> Self {
        Self {
            data,
            status,
            headers,
            latency,
        }
    }

    /// Maps the response data to a different type using the provided function.
    ///
    /// ```
    /// # use durianpay::Response;
    /// # use http::{HeaderMap, StatusCode};
    /// # use std::time::Duration;
    /// let response = Response::new(42, StatusCode::OK, HeaderMap::new(), Duration::ZERO);
    /// let string_response = response.map(|n| n.to_string());
    /// assert_eq!(string_response.data, "42");
    /// ```
    pub fn map<U, F>(self, f: F) -> Response<U>
    where
        F: FnOnce(T) -> U,
    {
        Response {
            data: f(self.data),
            status: self.status,
            headers: self.headers,
            latency: self.latency,
        }
    }

    /// Returns a reference to a header value by name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Consumes the response, returning only the data.
    pub fn into_inner(self) -> T {
        self.data
    }
}

impl Response<String> {
    /// Decodes the body as `{"data": T}` and unwraps the envelope.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Deserialization`] if the body does not match.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<Response<T>> {
        Ok(self.into_json::<Envelope<T>>()?.map(|envelope| envelope.data))
    }

    /// Decodes the whole body as `T`, without any envelope.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Deserialization`] if the body does not match.
    pub fn into_json<T: DeserializeOwned>(self) -> Result<Response<T>> {
        match serde_json::from_str::<T>(&self.data) {
            Ok(data) => Ok(Response {
                data,
                status: self.status,
                headers: self.headers,
                latency: self.latency,
            }),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    raw_response = %self.data,
                    "Failed to deserialize response"
                );

                Err(Error::Deserialization {
                    raw_response: self.data,
                    serde_error: e.to_string(),
                    status: self.status,
                })
            }
        }
    }
}

impl<T> AsRef<T> for Response<T> {
    fn as_ref(&self) -> &T {
        &self.data
    }
}

impl<T> std::ops::Deref for Response<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(default)]
    struct Status {
        status: String,
        is_completed: bool,
    }

    fn raw(body: &str) -> Response<String> {
        Response::new(
            body.to_string(),
            StatusCode::OK,
            HeaderMap::new(),
            Duration::from_millis(5),
        )
    }

    #[test]
    fn test_into_data_unwraps_envelope() {
        let decoded = raw(r#"{"data":{"status":"completed","is_completed":true}}"#)
            .into_data::<Status>()
            .unwrap();

        assert_eq!(
            decoded.data,
            Status {
                status: "completed".to_string(),
                is_completed: true
            }
        );
    }

    #[test]
    fn test_absent_fields_take_zero_value() {
        let decoded = raw(r#"{"data":{"status":"processing"}}"#)
            .into_data::<Status>()
            .unwrap();

        assert_eq!(decoded.data.status, "processing");
        assert!(!decoded.data.is_completed);
    }

    #[test]
    fn test_into_json_reads_top_level() {
        let decoded = raw(r#"{"status":"settled"}"#).into_json::<Status>().unwrap();
        assert_eq!(decoded.data.status, "settled");
    }

    #[test]
    fn test_missing_envelope_is_deserialization_error() {
        let result = raw(r#"{"status":"settled"}"#).into_data::<Status>();

        match result {
            Err(Error::Deserialization {
                raw_response,
                status,
                ..
            }) => {
                assert_eq!(status, StatusCode::OK);
                assert_eq!(raw_response, r#"{"status":"settled"}"#);
            }
            other => panic!("Expected Deserialization, got {:?}", other),
        }
    }
}
