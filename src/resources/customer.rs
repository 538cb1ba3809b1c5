//! Customer operations.

use serde_json::Value;

use super::into_params;
use crate::{
    cache::list_key,
    error::Result,
    http::{ApiResponse, PaystackClient, Transport},
    params::{filter_allowed, require_fields, to_query},
};

/// Customer façade.
///
/// List and fetch results are cached; every mutation invalidates the
/// affected entries so reads never serve stale customer data.
#[derive(Debug)]
pub struct Customer<'a, T: Transport> {
    client: &'a PaystackClient<T>,
}

impl<'a, T: Transport> Customer<'a, T> {
    pub(crate) fn new(client: &'a PaystackClient<T>) -> Self {
        Self { client }
    }

    /// Creates a customer. Requires `email`.
    ///
    /// # Errors
    ///
    /// Returns [`MissingParams`](crate::PaystackError::MissingParams) when
    /// `email` is absent, otherwise the classified pipeline error.
    pub async fn create(&self, data: Value) -> Result<ApiResponse> {
        let params = into_params(data);
        require_fields(&params, &["email"])?;
        let params =
            filter_allowed(&params, &["email", "first_name", "last_name", "phone", "metadata"]);
        let response = self.client.post("/customer", Value::Object(params)).await?;
        self.client.cache().invalidate_family("customers");
        Ok(response)
    }

    /// Lists customers. Results are cached per query.
    ///
    /// # Errors
    ///
    /// Returns the classified pipeline error.
    pub async fn list(&self, params: Value) -> Result<ApiResponse> {
        let query =
            to_query(&filter_allowed(&into_params(params), &["perPage", "page", "from", "to"]));
        let key = list_key("customers", &query);
        self.client
            .cache()
            .get_or_compute(&key, None, || self.client.get("/customer", query))
            .await
    }

    /// Fetches a customer by email or code. The result is cached.
    ///
    /// # Errors
    ///
    /// Returns the classified pipeline error.
    pub async fn fetch(&self, email_or_code: &str) -> Result<ApiResponse> {
        let key = format!("customer:{email_or_code}");
        let path = format!("/customer/{email_or_code}");
        self.client
            .cache()
            .get_or_compute(&key, None, || self.client.get(&path, vec![]))
            .await
    }

    /// Updates a customer and invalidates its cached entries.
    ///
    /// # Errors
    ///
    /// Returns the classified pipeline error.
    pub async fn update(&self, code: &str, data: Value) -> Result<ApiResponse> {
        let params = filter_allowed(
            &into_params(data),
            &["first_name", "last_name", "phone", "metadata"],
        );
        let response =
            self.client.put(&format!("/customer/{code}"), Value::Object(params)).await?;
        self.client.cache().invalidate(&format!("customer:{code}"));
        self.client.cache().invalidate_family("customers");
        Ok(response)
    }

    /// Submits identification details for a customer.
    ///
    /// Requires `first_name`, `last_name`, `type`, `value`, and `country`.
    ///
    /// # Errors
    ///
    /// Returns [`MissingParams`](crate::PaystackError::MissingParams) when a
    /// required field is absent, otherwise the classified pipeline error.
    pub async fn validate(&self, code: &str, data: Value) -> Result<ApiResponse> {
        let params = into_params(data);
        require_fields(&params, &["first_name", "last_name", "type", "value", "country"])?;
        let params = filter_allowed(
            &params,
            &[
                "first_name",
                "last_name",
                "type",
                "value",
                "country",
                "bvn",
                "bank_code",
                "account_number",
                "middle_name",
            ],
        );
        self.client
            .post(&format!("/customer/{code}/identification"), Value::Object(params))
            .await
    }

    /// Whitelists or blacklists a customer.
    ///
    /// Requires `customer` and `risk_action`.
    ///
    /// # Errors
    ///
    /// Returns [`MissingParams`](crate::PaystackError::MissingParams) when a
    /// required field is absent, otherwise the classified pipeline error.
    pub async fn set_risk_action(&self, data: Value) -> Result<ApiResponse> {
        let params = into_params(data);
        require_fields(&params, &["customer", "risk_action"])?;
        let params = filter_allowed(&params, &["customer", "risk_action"]);
        self.client.post("/customer/set_risk_action", Value::Object(params)).await
    }

    /// Deactivates a stored card authorization.
    ///
    /// # Errors
    ///
    /// Returns the classified pipeline error.
    pub async fn deactivate_authorization(&self, authorization_code: &str) -> Result<ApiResponse> {
        self.client
            .post(
                "/customer/deactivate_authorization",
                serde_json::json!({ "authorization_code": authorization_code }),
            )
            .await
    }
}
