//! Request metadata: everything the transport needs for one API call.

use crate::{Error, Result};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;
use serde_json::Value;

/// Metadata for an individual API request.
///
/// Built fresh for every call by the resource clients and handed to an
/// [`Api`](crate::transport::Api) implementation.
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// The HTTP method (GET, POST, etc.).
    pub method: Method,

    /// The request path (relative to the base URL), with any `:id`
    /// placeholder already substituted.
    pub path: String,

    /// Additional headers for this request.
    pub headers: HeaderMap,

    /// Query parameters for this request, in insertion order.
    pub query_params: Vec<(String, String)>,

    /// The serialized JSON body, if any.
    pub body: Option<Vec<u8>>,

    /// Value of the `X-Idempotency-Key` header. Empty when the operation
    /// does not use one.
    pub idempotency_key: String,
}

impl RequestMetadata {
    /// Creates a new `RequestMetadata` with the given method and path.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            query_params: Vec::new(),
            body: None,
            idempotency_key: String::new(),
        }
    }

    /// Adds a header to the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::Configuration(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::Configuration(format!("Invalid header value: {}", e)))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Adds a query parameter to the request.
    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push((key.into(), value.into()));
        self
    }

    /// Adds multiple query parameters to the request.
    pub fn with_query_params(mut self, params: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query_params.extend(params);
        self
    }

    /// Adds the fields of an options struct as query parameters.
    ///
    /// The struct must serialize to a flat JSON object. `null` fields are
    /// skipped, strings are used as-is, numbers and booleans are rendered
    /// with their JSON text, and arrays are joined with commas.
    ///
    /// ```
    /// use durianpay::metadata::RequestMetadata;
    /// use http::Method;
    /// use serde::Serialize;
    ///
    /// #[derive(Serialize)]
    /// struct Options { from: Option<String>, limit: Option<u32> }
    ///
    /// let metadata = RequestMetadata::new(Method::GET, "/v1/orders")
    ///     .with_query(&Options { from: None, limit: Some(10) })
    ///     .unwrap();
    /// assert_eq!(metadata.query_params, vec![("limit".to_string(), "10".to_string())]);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if the options do not serialize to a
    /// flat object.
    pub fn with_query<T: Serialize + ?Sized>(mut self, options: &T) -> Result<Self> {
        let value =
            serde_json::to_value(options).map_err(|e| Error::Serialization(e.to_string()))?;
        let fields = match value {
            Value::Object(fields) => fields,
            Value::Null => return Ok(self),
            other => {
                return Err(Error::Serialization(format!(
                    "query options must serialize to an object, got {}",
                    other
                )))
            }
        };

        for (key, value) in fields {
            if let Some(value) = query_value(value)? {
                self.query_params.push((key, value));
            }
        }
        Ok(self)
    }

    /// Serializes `body` to JSON and attaches it to the request.
    ///
    /// The bytes sent on the wire are exactly `serde_json::to_vec(body)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if the body cannot be serialized.
    pub fn with_json_body<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        let bytes = serde_json::to_vec(body).map_err(|e| Error::Serialization(e.to_string()))?;
        self.body = Some(bytes);
        Ok(self)
    }

    /// Sets the `X-Idempotency-Key` header value.
    pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = key.into();
        self
    }
}

fn query_value(value: Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Array(items) => {
            let mut parts = Vec::with_capacity(items.len());
            for item in items {
                if let Some(part) = query_value(item)? {
                    parts.push(part);
                }
            }
            Ok(Some(parts.join(",")))
        }
        Value::Object(_) => Err(Error::Serialization(
            "nested objects cannot be used as query parameters".to_string(),
        )),
    }
}

impl Default for RequestMetadata {
    fn default() -> Self {
        Self::new(Method::GET, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct ListOptions {
        from: Option<String>,
        to: Option<String>,
        skip: Option<u32>,
        limit: Option<u32>,
        force: Option<bool>,
    }

    #[test]
    fn test_query_skips_none_fields() {
        let options = ListOptions {
            from: Some("2024-01-01".to_string()),
            to: None,
            skip: Some(0),
            limit: Some(25),
            force: Some(true),
        };

        let metadata = RequestMetadata::new(Method::GET, "/v1/orders")
            .with_query(&options)
            .unwrap();

        let mut params = metadata.query_params.clone();
        params.sort();
        assert_eq!(
            params,
            vec![
                ("force".to_string(), "true".to_string()),
                ("from".to_string(), "2024-01-01".to_string()),
                ("limit".to_string(), "25".to_string()),
                ("skip".to_string(), "0".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_rejects_non_object() {
        let result = RequestMetadata::new(Method::GET, "/").with_query(&42);
        assert!(matches!(result, Err(Error::Serialization(_))));
    }

    #[test]
    fn test_json_body_matches_direct_serialization() {
        #[derive(Serialize)]
        struct Payload {
            zeta: u32,
            alpha: &'static str,
        }

        let payload = Payload { zeta: 1, alpha: "a" };
        let metadata = RequestMetadata::new(Method::POST, "/").with_json_body(&payload).unwrap();

        assert_eq!(metadata.body.unwrap(), serde_json::to_vec(&payload).unwrap());
    }

    #[test]
    fn test_invalid_header_is_configuration_error() {
        let result = RequestMetadata::new(Method::GET, "/").with_header("bad header", "x");
        assert!(matches!(result, Err(Error::Configuration(_))));
    }
}
