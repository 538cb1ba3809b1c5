//! Subscription operations.

use serde_json::Value;

use super::into_params;
use crate::{
    error::Result,
    http::{ApiResponse, PaystackClient, Transport},
    params::{filter_allowed, require_fields, to_query},
};

/// Subscription façade.
#[derive(Debug)]
pub struct Subscription<'a, T: Transport> {
    client: &'a PaystackClient<T>,
}

impl<'a, T: Transport> Subscription<'a, T> {
    pub(crate) fn new(client: &'a PaystackClient<T>) -> Self {
        Self { client }
    }

    /// Subscribes a customer to a plan. Requires `customer` and `plan`.
    ///
    /// # Errors
    ///
    /// Returns [`MissingParams`](crate::PaystackError::MissingParams) when a
    /// required field is absent, otherwise the classified pipeline error.
    pub async fn create(&self, data: Value) -> Result<ApiResponse> {
        let params = into_params(data);
        require_fields(&params, &["customer", "plan"])?;
        let params =
            filter_allowed(&params, &["customer", "plan", "authorization", "start_date"]);
        self.client.post("/subscription", Value::Object(params)).await
    }

    /// Lists subscriptions.
    ///
    /// # Errors
    ///
    /// Returns the classified pipeline error.
    pub async fn list(&self, params: Value) -> Result<ApiResponse> {
        let query = to_query(&filter_allowed(
            &into_params(params),
            &["perPage", "page", "customer", "plan", "from", "to"],
        ));
        self.client.get("/subscription", query).await
    }

    /// Fetches a subscription by ID or code.
    ///
    /// # Errors
    ///
    /// Returns the classified pipeline error.
    pub async fn fetch(&self, id_or_code: &str) -> Result<ApiResponse> {
        self.client.get(&format!("/subscription/{id_or_code}"), vec![]).await
    }

    /// Enables a subscription. Requires `code` and `token`.
    ///
    /// # Errors
    ///
    /// Returns [`MissingParams`](crate::PaystackError::MissingParams) when a
    /// required field is absent, otherwise the classified pipeline error.
    pub async fn enable(&self, data: Value) -> Result<ApiResponse> {
        let params = into_params(data);
        require_fields(&params, &["code", "token"])?;
        let params = filter_allowed(&params, &["code", "token"]);
        self.client.post("/subscription/enable", Value::Object(params)).await
    }

    /// Disables a subscription. Requires `code` and `token`.
    ///
    /// # Errors
    ///
    /// Returns [`MissingParams`](crate::PaystackError::MissingParams) when a
    /// required field is absent, otherwise the classified pipeline error.
    pub async fn disable(&self, data: Value) -> Result<ApiResponse> {
        let params = into_params(data);
        require_fields(&params, &["code", "token"])?;
        let params = filter_allowed(&params, &["code", "token"]);
        self.client.post("/subscription/disable", Value::Object(params)).await
    }

    /// Generates a card-update link for a subscription.
    ///
    /// # Errors
    ///
    /// Returns the classified pipeline error.
    pub async fn generate_update_link(&self, code: &str) -> Result<ApiResponse> {
        self.client.get(&format!("/subscription/{code}/manage/link"), vec![]).await
    }

    /// Emails the card-update link to the subscriber.
    ///
    /// # Errors
    ///
    /// Returns the classified pipeline error.
    pub async fn send_update_link(&self, code: &str) -> Result<ApiResponse> {
        self.client
            .post(&format!("/subscription/{code}/manage/email"), serde_json::json!({}))
            .await
    }
}
