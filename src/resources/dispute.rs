//! Dispute operations.

use serde_json::Value;

use super::{convert_amount_field, into_params};
use crate::{
    error::Result,
    http::{ApiResponse, PaystackClient, Transport},
    params::{filter_allowed, require_fields, to_query},
};

const LIST_FIELDS: &[&str] = &["perPage", "page", "from", "to", "transaction", "status"];

/// Dispute façade.
///
/// Refund amounts on `update` and `resolve` are accepted in major units.
#[derive(Debug)]
pub struct Dispute<'a, T: Transport> {
    client: &'a PaystackClient<T>,
}

impl<'a, T: Transport> Dispute<'a, T> {
    pub(crate) fn new(client: &'a PaystackClient<T>) -> Self {
        Self { client }
    }

    /// Lists disputes.
    ///
    /// # Errors
    ///
    /// Returns the classified pipeline error.
    pub async fn list(&self, params: Value) -> Result<ApiResponse> {
        let query = to_query(&filter_allowed(&into_params(params), LIST_FIELDS));
        self.client.get("/dispute", query).await
    }

    /// Fetches a dispute by ID.
    ///
    /// # Errors
    ///
    /// Returns the classified pipeline error.
    pub async fn fetch(&self, id: &str) -> Result<ApiResponse> {
        self.client.get(&format!("/dispute/{id}"), vec![]).await
    }

    /// Lists disputes raised against one transaction.
    ///
    /// # Errors
    ///
    /// Returns the classified pipeline error.
    pub async fn list_transaction_disputes(&self, transaction_id: &str) -> Result<ApiResponse> {
        self.client.get(&format!("/dispute/transaction/{transaction_id}"), vec![]).await
    }

    /// Updates a dispute. Requires `refund_amount` (major units).
    ///
    /// # Errors
    ///
    /// Returns [`MissingParams`](crate::PaystackError::MissingParams) when
    /// `refund_amount` is absent, otherwise the classified pipeline error.
    pub async fn update(&self, id: &str, data: Value) -> Result<ApiResponse> {
        let mut params = into_params(data);
        require_fields(&params, &["refund_amount"])?;
        convert_amount_field(&mut params, "refund_amount");
        let params = filter_allowed(&params, &["refund_amount", "uploaded_filename"]);
        self.client.put(&format!("/dispute/{id}"), Value::Object(params)).await
    }

    /// Attaches evidence to a dispute.
    ///
    /// Requires `customer_email`, `customer_name`, `customer_phone`, and
    /// `service_details`.
    ///
    /// # Errors
    ///
    /// Returns [`MissingParams`](crate::PaystackError::MissingParams) when a
    /// required field is absent, otherwise the classified pipeline error.
    pub async fn add_evidence(&self, id: &str, data: Value) -> Result<ApiResponse> {
        let params = into_params(data);
        require_fields(
            &params,
            &["customer_email", "customer_name", "customer_phone", "service_details"],
        )?;
        let params = filter_allowed(
            &params,
            &[
                "customer_email",
                "customer_name",
                "customer_phone",
                "service_details",
                "delivery_address",
                "delivery_date",
            ],
        );
        self.client.post(&format!("/dispute/{id}/evidence"), Value::Object(params)).await
    }

    /// Requests a signed URL for uploading dispute evidence.
    ///
    /// # Errors
    ///
    /// Returns the classified pipeline error.
    pub async fn get_upload_url(&self, id: &str, params: Value) -> Result<ApiResponse> {
        let query = to_query(&filter_allowed(&into_params(params), &["upload_filename"]));
        self.client.get(&format!("/dispute/{id}/upload_url"), query).await
    }

    /// Resolves a dispute.
    ///
    /// Requires `resolution`, `message`, and `uploaded_filename`; an
    /// optional `refund_amount` (major units) is converted.
    ///
    /// # Errors
    ///
    /// Returns [`MissingParams`](crate::PaystackError::MissingParams) when a
    /// required field is absent, otherwise the classified pipeline error.
    pub async fn resolve(&self, id: &str, data: Value) -> Result<ApiResponse> {
        let mut params = into_params(data);
        require_fields(&params, &["resolution", "message", "uploaded_filename"])?;
        convert_amount_field(&mut params, "refund_amount");
        let params = filter_allowed(
            &params,
            &["resolution", "message", "refund_amount", "uploaded_filename", "evidence"],
        );
        self.client.put(&format!("/dispute/{id}/resolve"), Value::Object(params)).await
    }

    /// Requests an export of disputes.
    ///
    /// # Errors
    ///
    /// Returns the classified pipeline error.
    pub async fn export(&self, params: Value) -> Result<ApiResponse> {
        let query = to_query(&filter_allowed(&into_params(params), LIST_FIELDS));
        self.client.get("/dispute/export", query).await
    }
}
