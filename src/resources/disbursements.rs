//! Disbursements: paying out to bank accounts.
//!
//! Validation, submission and top-up take their `X-Idempotency-Key` from the
//! payload's `idempotency_key` field. The other operations send an empty key.

use super::{path_with_id, send_data};
use crate::{metadata::RequestMetadata, transport::Api, Result};
use http::Method;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const VALIDATE_PATH: &str = "/v1/disbursements/validate";
const SUBMIT_PATH: &str = "/v1/disbursements/submit";
const APPROVE_PATH: &str = "/v1/disbursements/:id/approve";
const ITEMS_PATH: &str = "/v1/disbursements/:id/items";
const DISBURSEMENT_PATH: &str = "/v1/disbursements/:id";
const BANKS_PATH: &str = "/v1/disbursements/banks";
const TOPUP_PATH: &str = "/v1/disbursements/topup";
const TOPUP_BY_ID_PATH: &str = "/v1/disbursements/topup/:id";
const BALANCE_PATH: &str = "/v1/merchants/balance";

/// Checks that a bank account exists before paying out to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidateDisbursementPayload {
    pub idempotency_key: String,
    pub account_number: String,
    pub bank_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidateDisbursementResponse {
    pub account_number: String,
    pub account_holder: String,
    pub bank_code: String,
    pub status: String,
}

/// A batch of payouts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmitDisbursementPayload {
    pub idempotency_key: String,
    pub name: String,
    pub description: String,
    pub items: Vec<DisbursementItem>,
}

/// One payout inside a [`SubmitDisbursementPayload`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisbursementItem {
    pub name: String,
    pub account_owner_name: String,
    pub bank_code: String,
    pub amount: String,
    pub account_number: String,
    pub email_recipient: String,
    pub phone_number: String,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmitDisbursementOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_disburse: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_validation: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApproveDisbursementOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_validation: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchDisbursementItemsOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// A disbursement batch as returned by submit, approve and fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Disbursement {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub total_amount: String,
    pub total_disbursements: i64,
    pub description: String,
    pub fees: i64,
    pub created_at: String,
}

/// A disbursement batch together with its items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisbursementItems {
    pub id: String,
    pub name: String,
    pub status: String,
    pub total_amount: String,
    pub total_disbursements: i64,
    pub description: String,
    pub fees: i64,
    pub disbursement_batch_items: Vec<DisbursementBatchItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisbursementBatchItem {
    pub id: String,
    pub disbursement_batch_id: String,
    pub name: String,
    pub account_owner_name: String,
    pub real_name: String,
    pub bank_code: String,
    pub amount: String,
    pub account_number: String,
    pub email_recipient: String,
    pub phone_number: String,
    pub invalid_fields: Vec<InvalidField>,
    pub status: String,
    pub notes: String,
    pub receipt: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvalidField {
    pub key: String,
    pub message: String,
}

/// A bank that can receive disbursements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bank {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub can_disburse: bool,
    pub can_validate_disburse: bool,
}

/// Tops up the disbursement balance by bank transfer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopupPayload {
    pub idempotency_key: String,
    pub bank_id: i64,
    pub amount: String,
    pub currency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Topup {
    pub id: String,
    pub merchant_id: String,
    pub sender_bank: String,
    pub total_amount: String,
    pub status: String,
    pub expiry_date: String,
    pub transfer_to: TopupTransferTo,
    pub created_at: String,
    pub updated_at: String,
}

/// The account the merchant should transfer a top-up to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopupTransferTo {
    pub bank_code: String,
    pub bank_name: String,
    pub account_number: String,
    pub account_holder_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Balance {
    pub balance: String,
}

/// Disbursement operations. Obtained from [`Client::disbursements`](crate::Client::disbursements).
#[derive(Clone)]
pub struct Disbursements {
    api: Arc<dyn Api>,
}

impl Disbursements {
    pub(crate) fn new(api: Arc<dyn Api>) -> Self {
        Self { api }
    }

    /// Validates a destination bank account.
    ///
    /// ```no_run
    /// use durianpay::Client;
    /// use durianpay::resources::disbursements::ValidateDisbursementPayload;
    ///
    /// # async fn example() -> Result<(), durianpay::Error> {
    /// let client = Client::new("dp_test_XXXXXXXX")?;
    /// let result = client
    ///     .disbursements()
    ///     .validate(&ValidateDisbursementPayload {
    ///         idempotency_key: "1".to_string(),
    ///         account_number: "123".to_string(),
    ///         bank_code: "bca".to_string(),
    ///     })
    ///     .await?;
    /// println!("{} is {}", result.account_number, result.status);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn validate(
        &self,
        payload: &ValidateDisbursementPayload,
    ) -> Result<ValidateDisbursementResponse> {
        let metadata = RequestMetadata::new(Method::POST, VALIDATE_PATH)
            .with_json_body(payload)?
            .with_idempotency_key(payload.idempotency_key.as_str());
        send_data(self.api.as_ref(), metadata).await
    }

    /// Submits a disbursement batch.
    pub async fn submit(
        &self,
        payload: &SubmitDisbursementPayload,
        options: &SubmitDisbursementOptions,
    ) -> Result<Disbursement> {
        let metadata = RequestMetadata::new(Method::POST, SUBMIT_PATH)
            .with_query(options)?
            .with_json_body(payload)?
            .with_idempotency_key(payload.idempotency_key.as_str());
        send_data(self.api.as_ref(), metadata).await
    }

    /// Approves a submitted disbursement batch.
    pub async fn approve(
        &self,
        id: &str,
        options: &ApproveDisbursementOptions,
    ) -> Result<Disbursement> {
        let metadata = RequestMetadata::new(Method::POST, path_with_id(APPROVE_PATH, id)?)
            .with_query(options)?;
        send_data(self.api.as_ref(), metadata).await
    }

    /// Fetches a disbursement batch with its items.
    pub async fn fetch_items_by_id(
        &self,
        id: &str,
        options: &FetchDisbursementItemsOptions,
    ) -> Result<DisbursementItems> {
        let metadata =
            RequestMetadata::new(Method::GET, path_with_id(ITEMS_PATH, id)?).with_query(options)?;
        send_data(self.api.as_ref(), metadata).await
    }

    /// Fetches a disbursement batch.
    pub async fn fetch_by_id(&self, id: &str) -> Result<Disbursement> {
        let metadata = RequestMetadata::new(Method::GET, path_with_id(DISBURSEMENT_PATH, id)?);
        send_data(self.api.as_ref(), metadata).await
    }

    /// Deletes a disbursement batch that has not been approved yet.
    ///
    /// Returns the confirmation message sent by the API.
    pub async fn delete(&self, id: &str) -> Result<String> {
        let metadata = RequestMetadata::new(Method::DELETE, path_with_id(DISBURSEMENT_PATH, id)?);
        send_data(self.api.as_ref(), metadata).await
    }

    /// Lists the banks available for disbursement.
    pub async fn fetch_banks(&self) -> Result<Vec<Bank>> {
        let metadata = RequestMetadata::new(Method::GET, BANKS_PATH);
        send_data(self.api.as_ref(), metadata).await
    }

    /// Requests a top-up of the disbursement balance.
    pub async fn topup(&self, payload: &TopupPayload) -> Result<Topup> {
        let metadata = RequestMetadata::new(Method::POST, TOPUP_PATH)
            .with_json_body(payload)?
            .with_idempotency_key(payload.idempotency_key.as_str());
        send_data(self.api.as_ref(), metadata).await
    }

    /// Fetches a top-up request.
    pub async fn fetch_topup_by_id(&self, id: &str) -> Result<Topup> {
        let metadata = RequestMetadata::new(Method::GET, path_with_id(TOPUP_BY_ID_PATH, id)?);
        send_data(self.api.as_ref(), metadata).await
    }

    /// Fetches the merchant's available balance.
    pub async fn fetch_balance(&self) -> Result<Balance> {
        let metadata = RequestMetadata::new(Method::GET, BALANCE_PATH);
        send_data(self.api.as_ref(), metadata).await
    }
}
