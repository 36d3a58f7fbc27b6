//! # durianpay - a typed client for the Durianpay payments API
//!
//! Covers disbursements, orders, payments, invoices, promos, refunds,
//! settlements, static virtual accounts and e-wallet account linking. Every
//! operation is a single authenticated HTTP round trip built on `reqwest`,
//! with JSON payloads and responses mapped to plain serde structs.
//!
//! ## Quick Start
//!
//! ```no_run
//! use durianpay::Client;
//! use durianpay::resources::disbursements::ValidateDisbursementPayload;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), durianpay::Error> {
//!     let client = Client::new("dp_test_XXXXXXXX")?;
//!
//!     let validation = client
//!         .disbursements()
//!         .validate(&ValidateDisbursementPayload {
//!             idempotency_key: "1".to_string(),
//!             account_number: "123".to_string(),
//!             bank_code: "bca".to_string(),
//!         })
//!         .await?;
//!
//!     println!("{} is {}", validation.account_number, validation.status);
//!     Ok(())
//! }
//! ```
//!
//! ## Requests
//!
//! Each request carries `Content-Type: application/json`, an
//! `Authorization: Basic base64(api_key + ":")` header and an
//! `X-Idempotency-Key` header. Operations whose payload has an
//! `idempotency_key` field (disbursement validation, submission and top-up)
//! send that value; all others send an empty key.
//!
//! Nothing is retried, paginated or cached: each method performs exactly one
//! request. Dropping the returned future abandons the request, so callers can
//! bound a call with `tokio::time::timeout` or cancel it with `tokio::select!`.
//!
//! ## Error Handling
//!
//! Only a `200` answer counts as success. Every failure is an [`Error`]:
//!
//! ```no_run
//! use durianpay::{Client, Error, SDK_INTERNAL_ERROR};
//!
//! # async fn example() -> Result<(), Error> {
//! # let client = Client::new("dp_test_XXXXXXXX")?;
//! match client.disbursements().fetch_by_id("dis_XXXXXXXX").await {
//!     Ok(disbursement) => println!("Status: {}", disbursement.status),
//!     Err(e) if e.error_code() == SDK_INTERNAL_ERROR => {
//!         eprintln!("client-side failure: {}", e.message());
//!     }
//!     Err(e) => {
//!         eprintln!("API error {:?} {}: {}", e.status(), e.error_code(), e.message());
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! Resource clients only depend on the [`transport::Api`] trait, so a test
//! double can stand in for HTTP via [`Client::with_api`].

mod client;
mod error;
pub mod metadata;
pub mod resources;
mod response;
pub mod transport;

pub use client::{Client, ClientBuilder, API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use error::{ApiErrorBody, Error, FieldError, Result, SDK_INTERNAL_ERROR};
pub use response::Response;
pub use transport::{Api, ApiKey, HttpTransport};
