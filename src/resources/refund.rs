//! Refund operations.

use serde_json::Value;

use super::{convert_amount_field, into_params};
use crate::{
    error::Result,
    http::{ApiResponse, PaystackClient, Transport},
    params::{filter_allowed, require_fields, to_query},
};

/// Refund façade.
#[derive(Debug)]
pub struct Refund<'a, T: Transport> {
    client: &'a PaystackClient<T>,
}

impl<'a, T: Transport> Refund<'a, T> {
    pub(crate) fn new(client: &'a PaystackClient<T>) -> Self {
        Self { client }
    }

    /// Creates a refund. Requires `transaction`; an optional `amount`
    /// (major units) refunds partially.
    ///
    /// # Errors
    ///
    /// Returns [`MissingParams`](crate::PaystackError::MissingParams) when
    /// `transaction` is absent, otherwise the classified pipeline error.
    pub async fn create(&self, data: Value) -> Result<ApiResponse> {
        let mut params = into_params(data);
        require_fields(&params, &["transaction"])?;
        convert_amount_field(&mut params, "amount");
        let params = filter_allowed(
            &params,
            &["transaction", "amount", "currency", "customer_note", "merchant_note", "metadata"],
        );
        self.client.post("/refund", Value::Object(params)).await
    }

    /// Lists refunds.
    ///
    /// # Errors
    ///
    /// Returns the classified pipeline error.
    pub async fn list(&self, params: Value) -> Result<ApiResponse> {
        let query = to_query(&filter_allowed(
            &into_params(params),
            &["perPage", "page", "from", "to", "reference", "currency", "transaction"],
        ));
        self.client.get("/refund", query).await
    }

    /// Fetches a refund by reference.
    ///
    /// # Errors
    ///
    /// Returns the classified pipeline error.
    pub async fn fetch(&self, reference: &str) -> Result<ApiResponse> {
        self.client.get(&format!("/refund/{reference}"), vec![]).await
    }
}
