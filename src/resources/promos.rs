//! Promos: discounts applied at checkout.

use super::{path_with_id, send_data};
use crate::{metadata::RequestMetadata, transport::Api, Result};
use http::Method;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const PROMOS_PATH: &str = "/v1/merchants/promos";
const PROMO_PATH: &str = "/v1/merchants/promos/:id";

/// Creates or replaces a promo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromoPayload {
    #[serde(rename = "type")]
    pub kind: String,
    pub label: String,
    pub code: String,
    pub description: String,
    pub currency: String,
    pub discount_type: String,
    pub discount: String,
    pub starts_at: String,
    pub ends_at: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub sub_type: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub limit_type: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub limit_value: Option<i64>,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub price_deduction_type: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub min_order_amount: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub max_discount_amount: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub bin_list: Vec<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub bank_codes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Promo {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub label: String,
    pub code: String,
    pub description: String,
    pub currency: String,
    pub discount_type: String,
    pub discount: String,
    pub status: String,
    pub starts_at: String,
    pub ends_at: String,
    pub sub_type: String,
    pub limit_type: String,
    pub limit_value: i64,
    pub price_deduction_type: String,
    pub min_order_amount: String,
    pub max_discount_amount: String,
    pub bin_list: Vec<i64>,
    pub bank_codes: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Promo operations. Obtained from [`Client::promos`](crate::Client::promos).
#[derive(Clone)]
pub struct Promos {
    api: Arc<dyn Api>,
}

impl Promos {
    pub(crate) fn new(api: Arc<dyn Api>) -> Self {
        Self { api }
    }

    /// Creates a promo.
    pub async fn create(&self, payload: &PromoPayload) -> Result<Promo> {
        let metadata = RequestMetadata::new(Method::POST, PROMOS_PATH).with_json_body(payload)?;
        send_data(self.api.as_ref(), metadata).await
    }

    /// Lists all promos.
    pub async fn fetch(&self) -> Result<Vec<Promo>> {
        let metadata = RequestMetadata::new(Method::GET, PROMOS_PATH);
        send_data(self.api.as_ref(), metadata).await
    }

    /// Fetches one promo.
    pub async fn fetch_by_id(&self, id: &str) -> Result<Promo> {
        let metadata = RequestMetadata::new(Method::GET, path_with_id(PROMO_PATH, id)?);
        send_data(self.api.as_ref(), metadata).await
    }

    /// Updates a promo.
    pub async fn update(&self, id: &str, payload: &PromoPayload) -> Result<Promo> {
        let metadata = RequestMetadata::new(Method::PATCH, path_with_id(PROMO_PATH, id)?)
            .with_json_body(payload)?;
        send_data(self.api.as_ref(), metadata).await
    }

    /// Deletes a promo. Returns the confirmation message sent by the API.
    pub async fn delete(&self, id: &str) -> Result<String> {
        let metadata = RequestMetadata::new(Method::DELETE, path_with_id(PROMO_PATH, id)?);
        send_data(self.api.as_ref(), metadata).await
    }
}
