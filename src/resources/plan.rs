//! Plan operations.

use serde_json::Value;

use super::{convert_amount_field, into_params};
use crate::{
    cache::list_key,
    error::Result,
    http::{ApiResponse, PaystackClient, Transport},
    params::{filter_allowed, require_fields, to_query},
};

const PLAN_FIELDS: &[&str] = &[
    "name",
    "amount",
    "interval",
    "description",
    "currency",
    "invoice_limit",
    "send_invoices",
    "send_sms",
];

/// Subscription plan façade.
#[derive(Debug)]
pub struct Plan<'a, T: Transport> {
    client: &'a PaystackClient<T>,
}

impl<'a, T: Transport> Plan<'a, T> {
    pub(crate) fn new(client: &'a PaystackClient<T>) -> Self {
        Self { client }
    }

    /// Creates a plan. Requires `name`, `amount` (major units), and
    /// `interval`.
    ///
    /// # Errors
    ///
    /// Returns [`MissingParams`](crate::PaystackError::MissingParams) when a
    /// required field is absent, otherwise the classified pipeline error.
    pub async fn create(&self, data: Value) -> Result<ApiResponse> {
        let mut params = into_params(data);
        require_fields(&params, &["name", "amount", "interval"])?;
        convert_amount_field(&mut params, "amount");
        let params = filter_allowed(&params, PLAN_FIELDS);
        let response = self.client.post("/plan", Value::Object(params)).await?;
        self.client.cache().invalidate_family("plans");
        Ok(response)
    }

    /// Lists plans. Results are cached per query.
    ///
    /// # Errors
    ///
    /// Returns the classified pipeline error.
    pub async fn list(&self, params: Value) -> Result<ApiResponse> {
        let query = to_query(&filter_allowed(
            &into_params(params),
            &["perPage", "page", "from", "to", "interval", "amount"],
        ));
        let key = list_key("plans", &query);
        self.client
            .cache()
            .get_or_compute(&key, None, || self.client.get("/plan", query))
            .await
    }

    /// Fetches a plan by ID or code. The result is cached.
    ///
    /// # Errors
    ///
    /// Returns the classified pipeline error.
    pub async fn fetch(&self, id_or_code: &str) -> Result<ApiResponse> {
        let key = format!("plan:{id_or_code}");
        let path = format!("/plan/{id_or_code}");
        self.client
            .cache()
            .get_or_compute(&key, None, || self.client.get(&path, vec![]))
            .await
    }

    /// Updates a plan and invalidates its cached entries.
    ///
    /// # Errors
    ///
    /// Returns the classified pipeline error.
    pub async fn update(&self, id_or_code: &str, data: Value) -> Result<ApiResponse> {
        let mut params = into_params(data);
        convert_amount_field(&mut params, "amount");
        let params = filter_allowed(&params, PLAN_FIELDS);
        let response =
            self.client.put(&format!("/plan/{id_or_code}"), Value::Object(params)).await?;
        self.client.cache().invalidate(&format!("plan:{id_or_code}"));
        self.client.cache().invalidate_family("plans");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{
        config::PaystackConfig,
        http::{PaystackClient, testing::MockTransport},
    };

    fn client() -> PaystackClient<MockTransport> {
        PaystackClient::with_transport(PaystackConfig::new("sk_test_x"), MockTransport::new())
            .unwrap()
    }

    fn mock(client: &PaystackClient<MockTransport>) -> &MockTransport {
        client.transport()
    }

    fn ok_body() -> serde_json::Value {
        json!({ "status": true, "message": "ok", "data": {} })
    }

    #[tokio::test]
    async fn create_converts_amount_and_invalidates_lists() {
        let client = client();
        mock(&client).push_json(200, ok_body()); // list (cached)
        mock(&client).push_json(200, ok_body()); // create
        mock(&client).push_json(200, ok_body()); // list recomputed

        client.plans().list(json!({})).await.unwrap();
        client
            .plans()
            .create(json!({ "name": "Gold", "amount": 5000.0, "interval": "monthly" }))
            .await
            .unwrap();
        client.plans().list(json!({})).await.unwrap();

        assert_eq!(mock(&client).request_count(), 3);
        let create = mock(&client).request(1);
        assert_eq!(create.path, "/plan");
        assert_eq!(create.body.unwrap()["amount"], json!(500000));
    }

    #[tokio::test]
    async fn list_cache_is_keyed_by_query() {
        let client = client();
        mock(&client).push_json(200, ok_body());
        mock(&client).push_json(200, ok_body());

        client.plans().list(json!({ "page": 1 })).await.unwrap();
        client.plans().list(json!({ "page": 2 })).await.unwrap();
        client.plans().list(json!({ "page": 1 })).await.unwrap();

        assert_eq!(mock(&client).request_count(), 2);
    }

    #[tokio::test]
    async fn update_does_not_require_amount() {
        let client = client();
        mock(&client).push_json(200, ok_body());

        client.plans().update("PLN_1", json!({ "name": "Gold v2" })).await.unwrap();

        let request = mock(&client).request(0);
        assert_eq!(request.path, "/plan/PLN_1");
        assert!(request.body.unwrap().get("amount").is_none());
    }
}
