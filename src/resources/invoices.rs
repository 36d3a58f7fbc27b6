//! Invoices: payment requests sent to a customer with a due date.

use super::{path_with_id, send_data, Customer, ListOptions};
use crate::{metadata::RequestMetadata, transport::Api, Result};
use http::Method;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const INVOICES_PATH: &str = "/v1/invoices";
const INVOICE_PATH: &str = "/v1/invoices/:id";

pub type FetchInvoicesOptions = ListOptions;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateInvoicePayload {
    pub title: String,
    pub amount: String,
    pub currency: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub invoice_ref_id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub due_date: Option<String>,
    pub customer: Customer,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub items: Vec<InvoiceItem>,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub remarks: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub is_live: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceItem {
    pub name: String,
    pub qty: i64,
    pub price: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Invoice {
    pub id: String,
    pub invoice_ref_id: String,
    pub title: String,
    pub status: String,
    pub amount: String,
    pub remaining_amount: String,
    pub currency: String,
    pub start_date: String,
    pub due_date: String,
    pub customer_id: String,
    pub description: String,
    pub remarks: String,
    pub is_live: bool,
    pub payment_link_url: String,
    pub items: Vec<InvoiceItem>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceList {
    pub invoices: Vec<Invoice>,
    pub total: i64,
}

/// Invoice operations. Obtained from [`Client::invoices`](crate::Client::invoices).
#[derive(Clone)]
pub struct Invoices {
    api: Arc<dyn Api>,
}

impl Invoices {
    pub(crate) fn new(api: Arc<dyn Api>) -> Self {
        Self { api }
    }

    /// Creates an invoice.
    pub async fn create(&self, payload: &CreateInvoicePayload) -> Result<Invoice> {
        let metadata = RequestMetadata::new(Method::POST, INVOICES_PATH).with_json_body(payload)?;
        send_data(self.api.as_ref(), metadata).await
    }

    /// Lists invoices.
    pub async fn fetch(&self, options: &FetchInvoicesOptions) -> Result<InvoiceList> {
        let metadata = RequestMetadata::new(Method::GET, INVOICES_PATH).with_query(options)?;
        send_data(self.api.as_ref(), metadata).await
    }

    /// Fetches one invoice.
    pub async fn fetch_by_id(&self, id: &str) -> Result<Invoice> {
        let metadata = RequestMetadata::new(Method::GET, path_with_id(INVOICE_PATH, id)?);
        send_data(self.api.as_ref(), metadata).await
    }
}
