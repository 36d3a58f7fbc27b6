//! Static virtual accounts: reusable bank account numbers customers pay into.
//!
//! Waiting for a virtual account to be paid is left to the caller; poll
//! [`VirtualAccounts::fetch_by_id`] or use webhooks.

use super::{path_with_id, send_data, Customer, ListOptions};
use crate::{metadata::RequestMetadata, transport::Api, Result};
use http::Method;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const VIRTUAL_ACCOUNTS_PATH: &str = "/v1/virtual-accounts";
const VIRTUAL_ACCOUNT_PATH: &str = "/v1/virtual-accounts/:id";
const SIMULATE_PAYMENT_PATH: &str = "/v1/virtual-accounts/simulate-payment";

pub type FetchVirtualAccountsOptions = ListOptions;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateVirtualAccountPayload {
    pub bank_code: String,
    pub name: String,
    pub is_closed: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub amount: Option<String>,
    pub customer: Customer,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub is_reusable: Option<bool>,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub va_ref_id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub expiry_minutes: Option<i64>,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub account_suffix: String,
}

/// Fields of a virtual account that can be changed after creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateVirtualAccountPayload {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub is_closed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub expiry_minutes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status: Option<String>,
}

/// Pays into a virtual account in sandbox mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulateVirtualAccountPaymentPayload {
    pub bank_code: String,
    pub account_number: String,
    pub amount: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VirtualAccount {
    pub id: String,
    pub va_ref_id: String,
    pub bank_code: String,
    pub account_number: String,
    pub name: String,
    pub amount: String,
    pub status: String,
    pub is_closed: bool,
    pub is_reusable: bool,
    pub is_live: bool,
    pub customer_id: String,
    pub expiry_at: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VirtualAccountList {
    pub virtual_accounts: Vec<VirtualAccount>,
    pub total: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatedPayment {
    pub payment_id: String,
    pub virtual_account_id: String,
    pub amount: String,
    pub status: String,
}

/// Virtual account operations.
///
/// Obtained from [`Client::virtual_accounts`](crate::Client::virtual_accounts).
#[derive(Clone)]
pub struct VirtualAccounts {
    api: Arc<dyn Api>,
}

impl VirtualAccounts {
    pub(crate) fn new(api: Arc<dyn Api>) -> Self {
        Self { api }
    }

    /// Creates a static virtual account.
    pub async fn create(&self, payload: &CreateVirtualAccountPayload) -> Result<VirtualAccount> {
        let metadata =
            RequestMetadata::new(Method::POST, VIRTUAL_ACCOUNTS_PATH).with_json_body(payload)?;
        send_data(self.api.as_ref(), metadata).await
    }

    /// Lists virtual accounts.
    pub async fn fetch(
        &self,
        options: &FetchVirtualAccountsOptions,
    ) -> Result<VirtualAccountList> {
        let metadata =
            RequestMetadata::new(Method::GET, VIRTUAL_ACCOUNTS_PATH).with_query(options)?;
        send_data(self.api.as_ref(), metadata).await
    }

    /// Fetches one virtual account.
    pub async fn fetch_by_id(&self, id: &str) -> Result<VirtualAccount> {
        let metadata = RequestMetadata::new(Method::GET, path_with_id(VIRTUAL_ACCOUNT_PATH, id)?);
        send_data(self.api.as_ref(), metadata).await
    }

    /// Updates a virtual account.
    pub async fn update(
        &self,
        id: &str,
        payload: &UpdateVirtualAccountPayload,
    ) -> Result<VirtualAccount> {
        let metadata = RequestMetadata::new(Method::PATCH, path_with_id(VIRTUAL_ACCOUNT_PATH, id)?)
            .with_json_body(payload)?;
        send_data(self.api.as_ref(), metadata).await
    }

    /// Simulates a customer paying into a virtual account (sandbox only).
    pub async fn simulate_payment(
        &self,
        payload: &SimulateVirtualAccountPaymentPayload,
    ) -> Result<SimulatedPayment> {
        let metadata =
            RequestMetadata::new(Method::POST, SIMULATE_PAYMENT_PATH).with_json_body(payload)?;
        send_data(self.api.as_ref(), metadata).await
    }
}
