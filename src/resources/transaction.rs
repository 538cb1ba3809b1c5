//! Transaction operations.

use serde_json::Value;

use super::{convert_amount_field, into_params};
use crate::{
    error::Result,
    http::{ApiResponse, PaystackClient, Transport},
    params::{filter_allowed, require_fields, to_query},
};

const INITIALIZE_FIELDS: &[&str] = &[
    "email",
    "amount",
    "currency",
    "reference",
    "callback_url",
    "plan",
    "invoice_limit",
    "metadata",
    "channels",
    "split_code",
    "subaccount",
    "transaction_charge",
    "bearer",
];

const CHARGE_FIELDS: &[&str] = &[
    "email",
    "amount",
    "authorization_code",
    "reference",
    "currency",
    "metadata",
    "channels",
    "subaccount",
    "transaction_charge",
    "bearer",
    "queue",
];

const LIST_FIELDS: &[&str] = &[
    "perPage",
    "page",
    "from",
    "to",
    "customer",
    "status",
    "currency",
    "amount",
    "settled",
    "settlement",
    "payment_page",
];

/// Transaction façade.
///
/// Amounts are accepted in major units and converted to subunits before the
/// request is built.
#[derive(Debug)]
pub struct Transaction<'a, T: Transport> {
    client: &'a PaystackClient<T>,
}

impl<'a, T: Transport> Transaction<'a, T> {
    pub(crate) fn new(client: &'a PaystackClient<T>) -> Self {
        Self { client }
    }

    /// Initializes a transaction and returns the authorization URL.
    ///
    /// Requires `email` and `amount` (major units).
    ///
    /// # Errors
    ///
    /// Returns [`MissingParams`](crate::PaystackError::MissingParams) when a
    /// required field is absent, otherwise the classified pipeline error.
    pub async fn initialize(&self, data: Value) -> Result<ApiResponse> {
        let mut params = into_params(data);
        require_fields(&params, &["email", "amount"])?;
        convert_amount_field(&mut params, "amount");
        let params = filter_allowed(&params, INITIALIZE_FIELDS);
        self.client.post("/transaction/initialize", Value::Object(params)).await
    }

    /// Verifies a transaction by its reference.
    ///
    /// # Errors
    ///
    /// Returns the classified pipeline error.
    pub async fn verify(&self, reference: &str) -> Result<ApiResponse> {
        self.client.get(&format!("/transaction/verify/{reference}"), vec![]).await
    }

    /// Lists transactions.
    ///
    /// # Errors
    ///
    /// Returns the classified pipeline error.
    pub async fn list(&self, params: Value) -> Result<ApiResponse> {
        let query = to_query(&filter_allowed(&into_params(params), LIST_FIELDS));
        self.client.get("/transaction", query).await
    }

    /// Fetches a single transaction by ID.
    ///
    /// # Errors
    ///
    /// Returns the classified pipeline error.
    pub async fn fetch(&self, id: u64) -> Result<ApiResponse> {
        self.client.get(&format!("/transaction/{id}"), vec![]).await
    }

    /// Charges a stored authorization.
    ///
    /// Requires `email`, `amount` (major units), and `authorization_code`.
    ///
    /// # Errors
    ///
    /// Returns [`MissingParams`](crate::PaystackError::MissingParams) when a
    /// required field is absent, otherwise the classified pipeline error.
    pub async fn charge_authorization(&self, data: Value) -> Result<ApiResponse> {
        let mut params = into_params(data);
        require_fields(&params, &["email", "amount", "authorization_code"])?;
        convert_amount_field(&mut params, "amount");
        let params = filter_allowed(&params, CHARGE_FIELDS);
        self.client.post("/transaction/charge_authorization", Value::Object(params)).await
    }

    /// Returns the timeline of a transaction by ID or reference.
    ///
    /// # Errors
    ///
    /// Returns the classified pipeline error.
    pub async fn timeline(&self, id_or_reference: &str) -> Result<ApiResponse> {
        self.client.get(&format!("/transaction/timeline/{id_or_reference}"), vec![]).await
    }

    /// Returns transaction volume totals.
    ///
    /// # Errors
    ///
    /// Returns the classified pipeline error.
    pub async fn totals(&self, params: Value) -> Result<ApiResponse> {
        let query =
            to_query(&filter_allowed(&into_params(params), &["perPage", "page", "from", "to"]));
        self.client.get("/transaction/totals", query).await
    }

    /// Requests an export of transactions.
    ///
    /// # Errors
    ///
    /// Returns the classified pipeline error.
    pub async fn export(&self, params: Value) -> Result<ApiResponse> {
        let query = to_query(&filter_allowed(&into_params(params), LIST_FIELDS));
        self.client.get("/transaction/export", query).await
    }

    /// Debits part of a previously authorized amount.
    ///
    /// Requires `authorization_code`, `currency`, `amount` (major units),
    /// and `email`.
    ///
    /// # Errors
    ///
    /// Returns [`MissingParams`](crate::PaystackError::MissingParams) when a
    /// required field is absent, otherwise the classified pipeline error.
    pub async fn partial_debit(&self, data: Value) -> Result<ApiResponse> {
        let mut params = into_params(data);
        require_fields(&params, &["authorization_code", "currency", "amount", "email"])?;
        convert_amount_field(&mut params, "amount");
        let params = filter_allowed(
            &params,
            &["authorization_code", "currency", "amount", "email", "reference", "at_least", "metadata"],
        );
        self.client.post("/transaction/partial_debit", Value::Object(params)).await
    }

    /// Checks whether an authorization is reusable.
    ///
    /// # Errors
    ///
    /// Returns the classified pipeline error.
    pub async fn check_authorization(&self, authorization_code: &str) -> Result<ApiResponse> {
        self.client
            .get(&format!("/transaction/check_authorization/{authorization_code}"), vec![])
            .await
    }
}
