//! Settlements: payouts of collected payments to the merchant.
//!
//! Unlike every other resource, settlement endpoints return their payload at
//! the top level of the body, not inside a `{"data": ...}` envelope.

use super::{path_with_id, send_json, ListOptions};
use crate::{metadata::RequestMetadata, transport::Api, Result};
use http::Method;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const DETAILS_PATH: &str = "/v1/settlements/details";
const SETTLEMENT_PATH: &str = "/v1/settlements/:id";
const STATUS_PATH: &str = "/v1/settlements/:id/status";

pub type FetchSettlementsOptions = ListOptions;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementDetails {
    pub settlements: Vec<Settlement>,
    pub total: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settlement {
    pub id: String,
    pub merchant_id: String,
    pub status: String,
    pub amount: String,
    pub fee: String,
    pub settled_amount: String,
    pub currency: String,
    pub bank_code: String,
    pub account_number: String,
    pub settlement_date: String,
    pub created_at: String,
    pub updated_at: String,
    pub payments: Vec<SettledPayment>,
}

/// A payment included in a settlement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettledPayment {
    pub payment_id: String,
    pub order_id: String,
    pub amount: String,
    pub fee: String,
    pub settled_amount: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementStatus {
    pub id: String,
    pub status: String,
    pub settled_at: String,
}

/// Settlement operations. Obtained from [`Client::settlements`](crate::Client::settlements).
#[derive(Clone)]
pub struct Settlements {
    api: Arc<dyn Api>,
}

impl Settlements {
    pub(crate) fn new(api: Arc<dyn Api>) -> Self {
        Self { api }
    }

    /// Lists settlements with their payments.
    pub async fn fetch_details(
        &self,
        options: &FetchSettlementsOptions,
    ) -> Result<SettlementDetails> {
        let metadata = RequestMetadata::new(Method::GET, DETAILS_PATH).with_query(options)?;
        send_json(self.api.as_ref(), metadata).await
    }

    /// Fetches one settlement.
    pub async fn fetch_by_id(&self, id: &str) -> Result<Settlement> {
        let metadata = RequestMetadata::new(Method::GET, path_with_id(SETTLEMENT_PATH, id)?);
        send_json(self.api.as_ref(), metadata).await
    }

    /// Fetches the status of one settlement.
    pub async fn fetch_status_by_id(&self, id: &str) -> Result<SettlementStatus> {
        let metadata = RequestMetadata::new(Method::GET, path_with_id(STATUS_PATH, id)?);
        send_json(self.api.as_ref(), metadata).await
    }
}
