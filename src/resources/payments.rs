//! Payments: charging an order through a payment method.
//!
//! Every charge goes to the same endpoint. The wire body is an envelope
//!
//! ```json
//! {"type": "VA", "request": { ...payload... }, "sandbox_options": {"force_fail": false, "delay_ms": 0}}
//! ```
//!
//! built here from the typed payload. Each charge payload carries an optional
//! [`SandboxOptions`] that is skipped by the payload's own serialization and
//! placed beside `request` instead.

use super::{path_with_id, send_data, ListOptions};
use crate::{metadata::RequestMetadata, transport::Api, Result};
use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

const CHARGE_PATH: &str = "/v1/payments/charge";
const PAYMENTS_PATH: &str = "/v1/payments";
const PAYMENT_PATH: &str = "/v1/payments/:id";
const STATUS_PATH: &str = "/v1/payments/:id/status";
const VERIFY_PATH: &str = "/v1/payments/:id/verify";
const CANCEL_PATH: &str = "/v1/payments/:id/cancel";
const MDR_FEES_PATH: &str = "/v1/payments/mdr_fees";

pub type FetchPaymentsOptions = ListOptions;

/// Sandbox-only knobs that shape how a test charge behaves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SandboxOptions {
    pub force_fail: bool,
    pub delay_ms: i64,
}

#[derive(Serialize)]
struct ChargeEnvelope<'a, P> {
    #[serde(rename = "type")]
    kind: &'a str,
    request: &'a P,
    #[serde(skip_serializing_if = "Option::is_none")]
    sandbox_options: Option<&'a SandboxOptions>,
}

/// A charge result: the payment method and its method-specific details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargeResponse<T> {
    #[serde(rename = "type")]
    pub kind: String,
    pub response: T,
}

/// Virtual account charge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChargeVaPayload {
    pub order_id: String,
    pub bank_code: String,
    pub name: String,
    pub amount: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub payment_ref_id: String,
    #[serde(skip)]
    pub sandbox_options: Option<SandboxOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaCharge {
    pub payment_id: String,
    pub order_id: String,
    pub account_number: String,
    pub payment_ref_id: String,
    pub paid_amount: String,
    pub expiration_time: String,
}

/// E-wallet charge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChargeEwalletPayload {
    pub order_id: String,
    pub wallet_type: String,
    pub mobile: String,
    pub amount: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub payment_ref_id: String,
    #[serde(skip)]
    pub sandbox_options: Option<SandboxOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EwalletCharge {
    pub payment_id: String,
    pub order_id: String,
    pub mobile: String,
    pub status: String,
    pub checkout_url: String,
    pub paid_amount: String,
    pub expiration_time: String,
}

/// Retail store (over-the-counter) charge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChargeRetailStorePayload {
    pub order_id: String,
    pub bank_code: String,
    pub name: String,
    pub amount: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub payment_ref_id: String,
    #[serde(skip)]
    pub sandbox_options: Option<SandboxOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetailStoreCharge {
    pub payment_id: String,
    pub order_id: String,
    pub account_number: String,
    pub payment_ref_id: String,
    pub paid_amount: String,
    pub expiration_time: String,
}

/// Online banking charge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChargeOnlineBankingPayload {
    pub order_id: String,
    #[serde(rename = "type")]
    pub bank_type: String,
    pub name: String,
    pub amount: String,
    pub customer_info: ChargeCustomerInfo,
    #[serde(skip)]
    pub sandbox_options: Option<SandboxOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargeCustomerInfo {
    pub id: String,
    pub email: String,
    pub given_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnlineBankingCharge {
    pub payment_id: String,
    pub order_id: String,
    pub paid_amount: String,
    pub status: String,
    pub redirect_url: String,
    pub expiration_time: String,
}

/// QRIS charge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChargeQrisPayload {
    pub order_id: String,
    #[serde(rename = "type")]
    pub qris_type: String,
    pub name: String,
    pub amount: String,
    #[serde(skip)]
    pub sandbox_options: Option<SandboxOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QrisCharge {
    pub payment_id: String,
    pub order_id: String,
    pub status: String,
    pub expiration_time: String,
    pub creation_time: String,
    pub qr_string: String,
    pub unique_id: String,
    pub qr_code: String,
    pub paid_amount: String,
}

/// Buy-now-pay-later charge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChargeBnplPayload {
    pub order_id: String,
    pub bank_code: String,
    pub name: String,
    pub amount: String,
    pub mobile: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub payment_ref_id: String,
    #[serde(skip)]
    pub sandbox_options: Option<SandboxOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BnplCharge {
    pub payment_id: String,
    pub order_id: String,
    pub redirect_url: String,
    pub paid_amount: String,
    pub payment_ref_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchPaymentOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expand: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Payment {
    pub id: String,
    pub order_id: String,
    pub payment_ref_id: String,
    pub signature: String,
    pub amount: String,
    pub status: String,
    pub is_live: bool,
    pub expiration_date: String,
    pub payment_details_type: String,
    pub method_id: String,
    pub currency: String,
    pub created_at: String,
    pub updated_at: String,
    pub metadata: Value,
    pub retry_count: i64,
    pub discount_amount: String,
    pub settlement_status: String,
    /// Present when `expand` was requested.
    pub order: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentList {
    pub payments: Vec<Payment>,
    pub total: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentStatus {
    pub status: String,
    pub is_completed: bool,
    pub signature: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerifyPaymentPayload {
    pub verification_signature: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentVerification {
    pub is_verified: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MdrFeesOptions {
    pub amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MdrFee {
    pub payment_method: String,
    pub bank_code: String,
    pub fee: String,
    pub fee_type: String,
    pub tax: String,
    pub settlement_amount: String,
}

/// Payment operations. Obtained from [`Client::payments`](crate::Client::payments).
#[derive(Clone)]
pub struct Payments {
    api: Arc<dyn Api>,
}

impl Payments {
    pub(crate) fn new(api: Arc<dyn Api>) -> Self {
        Self { api }
    }

    async fn charge<P, R>(
        &self,
        kind: &str,
        payload: &P,
        sandbox_options: Option<&SandboxOptions>,
    ) -> Result<ChargeResponse<R>>
    where
        P: Serialize + Sync,
        R: serde::de::DeserializeOwned + Default,
    {
        let envelope = ChargeEnvelope {
            kind,
            request: payload,
            sandbox_options,
        };
        let metadata = RequestMetadata::new(Method::POST, CHARGE_PATH).with_json_body(&envelope)?;
        send_data(self.api.as_ref(), metadata).await
    }

    /// Charges an order through a virtual account.
    pub async fn charge_va(&self, payload: &ChargeVaPayload) -> Result<ChargeResponse<VaCharge>> {
        self.charge("VA", payload, payload.sandbox_options.as_ref()).await
    }

    /// Charges an order through an e-wallet.
    pub async fn charge_ewallet(
        &self,
        payload: &ChargeEwalletPayload,
    ) -> Result<ChargeResponse<EwalletCharge>> {
        self.charge("EWALLET", payload, payload.sandbox_options.as_ref()).await
    }

    /// Charges an order payable at a retail store.
    pub async fn charge_retail_store(
        &self,
        payload: &ChargeRetailStorePayload,
    ) -> Result<ChargeResponse<RetailStoreCharge>> {
        self.charge("RETAILSTORE", payload, payload.sandbox_options.as_ref()).await
    }

    /// Charges an order through online banking.
    pub async fn charge_online_banking(
        &self,
        payload: &ChargeOnlineBankingPayload,
    ) -> Result<ChargeResponse<OnlineBankingCharge>> {
        self.charge("ONLINE_BANKING", payload, payload.sandbox_options.as_ref()).await
    }

    /// Charges an order through a QRIS code.
    pub async fn charge_qris(
        &self,
        payload: &ChargeQrisPayload,
    ) -> Result<ChargeResponse<QrisCharge>> {
        self.charge("QRIS", payload, payload.sandbox_options.as_ref()).await
    }

    /// Charges an order through a buy-now-pay-later provider.
    pub async fn charge_bnpl(
        &self,
        payload: &ChargeBnplPayload,
    ) -> Result<ChargeResponse<BnplCharge>> {
        self.charge("BNPL", payload, payload.sandbox_options.as_ref()).await
    }

    /// Lists payments.
    pub async fn fetch(&self, options: &FetchPaymentsOptions) -> Result<PaymentList> {
        let metadata = RequestMetadata::new(Method::GET, PAYMENTS_PATH).with_query(options)?;
        send_data(self.api.as_ref(), metadata).await
    }

    /// Fetches one payment.
    pub async fn fetch_by_id(&self, id: &str, options: &FetchPaymentOptions) -> Result<Payment> {
        let metadata =
            RequestMetadata::new(Method::GET, path_with_id(PAYMENT_PATH, id)?).with_query(options)?;
        send_data(self.api.as_ref(), metadata).await
    }

    /// Checks whether a payment has completed.
    pub async fn check_status(&self, id: &str) -> Result<PaymentStatus> {
        let metadata = RequestMetadata::new(Method::GET, path_with_id(STATUS_PATH, id)?);
        send_data(self.api.as_ref(), metadata).await
    }

    /// Verifies the signature received for a payment.
    pub async fn verify(
        &self,
        id: &str,
        payload: &VerifyPaymentPayload,
    ) -> Result<PaymentVerification> {
        let metadata = RequestMetadata::new(Method::POST, path_with_id(VERIFY_PATH, id)?)
            .with_json_body(payload)?;
        send_data(self.api.as_ref(), metadata).await
    }

    /// Cancels a pending payment.
    pub async fn cancel(&self, id: &str) -> Result<Payment> {
        let metadata = RequestMetadata::new(Method::PUT, path_with_id(CANCEL_PATH, id)?);
        send_data(self.api.as_ref(), metadata).await
    }

    /// Calculates the merchant discount rate fees for an amount.
    pub async fn calculate_mdr_fees(&self, options: &MdrFeesOptions) -> Result<Vec<MdrFee>> {
        let metadata = RequestMetadata::new(Method::GET, MDR_FEES_PATH).with_query(options)?;
        send_data(self.api.as_ref(), metadata).await
    }
}
