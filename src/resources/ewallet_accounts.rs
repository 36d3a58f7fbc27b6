//! E-wallet account linking.
//!
//! All three endpoints require the `Is-live: true` header.

use super::{path_with_id, send_data};
use crate::{metadata::RequestMetadata, transport::Api, Result};
use http::Method;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const LINK_PATH: &str = "/v1/ewallet/account/bind";
const UNLINK_PATH: &str = "/v1/ewallet/account/:id/unbind";
const ACCOUNT_PATH: &str = "/v1/ewallet/account/:id";

const IS_LIVE_HEADER: &str = "Is-live";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkEwalletAccountPayload {
    pub mobile: String,
    pub wallet_type: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub redirect_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnlinkEwalletAccountPayload {
    pub wallet_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchEwalletAccountOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EwalletAccount {
    pub id: String,
    pub customer_id: String,
    pub wallet_type: String,
    pub mobile: String,
    pub status: String,
    pub balance: String,
    pub redirect_url: String,
    pub linking_url: String,
    pub created_at: String,
    pub updated_at: String,
}

/// E-wallet account operations.
///
/// Obtained from [`Client::ewallet_accounts`](crate::Client::ewallet_accounts).
#[derive(Clone)]
pub struct EwalletAccounts {
    api: Arc<dyn Api>,
}

impl EwalletAccounts {
    pub(crate) fn new(api: Arc<dyn Api>) -> Self {
        Self { api }
    }

    /// Starts linking a customer's e-wallet. The customer completes the flow
    /// at the returned `linking_url`.
    pub async fn link(&self, payload: &LinkEwalletAccountPayload) -> Result<EwalletAccount> {
        let metadata = RequestMetadata::new(Method::POST, LINK_PATH)
            .with_header(IS_LIVE_HEADER, "true")?
            .with_json_body(payload)?;
        send_data(self.api.as_ref(), metadata).await
    }

    /// Unlinks a previously linked e-wallet.
    pub async fn unlink(
        &self,
        id: &str,
        payload: &UnlinkEwalletAccountPayload,
    ) -> Result<EwalletAccount> {
        let metadata = RequestMetadata::new(Method::POST, path_with_id(UNLINK_PATH, id)?)
            .with_header(IS_LIVE_HEADER, "true")?
            .with_json_body(payload)?;
        send_data(self.api.as_ref(), metadata).await
    }

    /// Fetches a linked e-wallet account, including its balance.
    pub async fn fetch_by_id(
        &self,
        id: &str,
        options: &FetchEwalletAccountOptions,
    ) -> Result<EwalletAccount> {
        let metadata = RequestMetadata::new(Method::GET, path_with_id(ACCOUNT_PATH, id)?)
            .with_header(IS_LIVE_HEADER, "true")?
            .with_query(options)?;
        send_data(self.api.as_ref(), metadata).await
    }
}
