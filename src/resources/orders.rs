//! Orders: the checkout object every payment is charged against.

use super::{path_with_id, send_data, Customer, ListOptions};
use crate::{metadata::RequestMetadata, transport::Api, Result};
use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

const ORDERS_PATH: &str = "/v1/orders";
const ORDER_PATH: &str = "/v1/orders/:id";

pub type FetchOrdersOptions = ListOptions;

/// Creates an order. Set `is_payment_link` to get a hosted payment link back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderPayload {
    pub amount: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub payment_option: String,
    pub currency: String,
    pub order_ref_id: String,
    pub customer: Customer,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub items: Vec<OrderItem>,
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub metadata: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub expiry_date: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not", default)]
    pub is_payment_link: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub is_live: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderItem {
    pub name: String,
    pub qty: i64,
    pub price: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub logo: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchOrderOptions {
    /// Related objects to inline, e.g. `"customer"` or `"payments"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expand: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Order {
    pub id: String,
    pub customer_id: String,
    pub order_ref_id: String,
    pub amount: String,
    pub payment_option: String,
    pub currency: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
    pub metadata: HashMap<String, String>,
    pub expiry_date: String,
    pub access_token: String,
    pub payment_link_url: String,
    pub is_live: bool,
    pub items: Vec<OrderItem>,
    /// Present when `expand=customer` was requested.
    pub customer: Option<Customer>,
    /// Present when `expand=payments` was requested.
    pub payments: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderList {
    pub orders: Vec<Order>,
    pub total: i64,
}

/// Order operations. Obtained from [`Client::orders`](crate::Client::orders).
#[derive(Clone)]
pub struct Orders {
    api: Arc<dyn Api>,
}

impl Orders {
    pub(crate) fn new(api: Arc<dyn Api>) -> Self {
        Self { api }
    }

    /// Creates an order.
    pub async fn create(&self, payload: &CreateOrderPayload) -> Result<Order> {
        let metadata = RequestMetadata::new(Method::POST, ORDERS_PATH).with_json_body(payload)?;
        send_data(self.api.as_ref(), metadata).await
    }

    /// Lists orders.
    pub async fn fetch(&self, options: &FetchOrdersOptions) -> Result<OrderList> {
        let metadata = RequestMetadata::new(Method::GET, ORDERS_PATH).with_query(options)?;
        send_data(self.api.as_ref(), metadata).await
    }

    /// Fetches one order.
    pub async fn fetch_by_id(&self, id: &str, options: &FetchOrderOptions) -> Result<Order> {
        let metadata =
            RequestMetadata::new(Method::GET, path_with_id(ORDER_PATH, id)?).with_query(options)?;
        send_data(self.api.as_ref(), metadata).await
    }
}
