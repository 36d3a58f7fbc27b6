//! Resource clients, one per API family.
//!
//! Every method follows the same shape: substitute the `:id` placeholder of
//! a fixed path, attach the JSON body, query options and headers, send one
//! request through the shared [`Api`], then decode the body. Most endpoints
//! wrap their payload in `{"data": ...}`; settlements do not, and decode the
//! body as-is.

pub mod disbursements;
pub mod ewallet_accounts;
pub mod invoices;
pub mod orders;
pub mod payments;
pub mod promos;
pub mod refunds;
pub mod settlements;
pub mod virtual_accounts;

use crate::{metadata::RequestMetadata, transport::Api, Error, Response, Result};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Date-range and paging options shared by the list endpoints.
///
/// Dates use the `YYYY-MM-DD` format expected by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Customer details attached to orders, invoices and virtual accounts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub customer_ref_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub given_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub mobile: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

/// A postal address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub receiver_name: String,
    pub receiver_phone: String,
    pub label: String,
    pub address_line_1: String,
    pub address_line_2: String,
    pub city: String,
    pub region: String,
    pub country: String,
    pub postal_code: String,
    pub landmark: String,
}

/// Characters escaped in an id so it stays one path segment.
const ID_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Replaces the `:id` placeholder of a path template with `id` as a single
/// percent-encoded path segment.
///
/// Empty ids and the dot segments `.` and `..` are rejected, since the URL
/// parser would resolve them into a different path.
pub(crate) fn path_with_id(template: &str, id: &str) -> Result<String> {
    if id.is_empty() || id == "." || id == ".." {
        return Err(Error::Configuration(format!("Invalid resource id: {:?}", id)));
    }
    let segment = utf8_percent_encode(id, ID_SEGMENT).to_string();
    Ok(template.replacen(":id", &segment, 1))
}

/// Sends the request and unwraps the `{"data": ...}` envelope.
pub(crate) async fn send_data<T: DeserializeOwned>(
    api: &dyn Api,
    metadata: RequestMetadata,
) -> Result<T> {
    Ok(api.request(metadata).await?.into_data::<T>()?.into_inner())
}

/// Sends the request and decodes the body without any envelope.
pub(crate) async fn send_json<T: DeserializeOwned>(
    api: &dyn Api,
    metadata: RequestMetadata,
) -> Result<T> {
    let response: Response<T> = api.request(metadata).await?.into_json()?;
    Ok(response.into_inner())
}
