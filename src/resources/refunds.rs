//! Refunds of completed payments.

use super::{path_with_id, send_data, ListOptions};
use crate::{metadata::RequestMetadata, transport::Api, Result};
use http::Method;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const REFUNDS_PATH: &str = "/v1/refunds";
const REFUND_PATH: &str = "/v1/refunds/:id";

pub type FetchRefundsOptions = ListOptions;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateRefundPayload {
    pub ref_id: String,
    pub amount: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub notes: String,
    pub payment_id: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub order_id: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub customer_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Refund {
    pub id: String,
    pub ref_id: String,
    pub merchant_id: String,
    pub customer_id: String,
    pub order_id: String,
    pub payment_id: String,
    pub refund_type: String,
    pub amount: String,
    pub status: String,
    pub notes: String,
    pub created_at: String,
    pub updated_at: String,
    pub approved_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefundList {
    pub refunds: Vec<Refund>,
    pub total: i64,
}

/// Refund operations. Obtained from [`Client::refunds`](crate::Client::refunds).
#[derive(Clone)]
pub struct Refunds {
    api: Arc<dyn Api>,
}

impl Refunds {
    pub(crate) fn new(api: Arc<dyn Api>) -> Self {
        Self { api }
    }

    /// Requests a refund.
    pub async fn create(&self, payload: &CreateRefundPayload) -> Result<Refund> {
        let metadata = RequestMetadata::new(Method::POST, REFUNDS_PATH).with_json_body(payload)?;
        send_data(self.api.as_ref(), metadata).await
    }

    /// Lists refunds.
    pub async fn fetch(&self, options: &FetchRefundsOptions) -> Result<RefundList> {
        let metadata = RequestMetadata::new(Method::GET, REFUNDS_PATH).with_query(options)?;
        send_data(self.api.as_ref(), metadata).await
    }

    /// Fetches one refund.
    pub async fn fetch_by_id(&self, id: &str) -> Result<Refund> {
        let metadata = RequestMetadata::new(Method::GET, path_with_id(REFUND_PATH, id)?);
        send_data(self.api.as_ref(), metadata).await
    }
}
