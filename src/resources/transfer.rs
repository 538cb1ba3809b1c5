//! Transfer operations.

use serde_json::Value;

use super::{convert_amount_field, into_params};
use crate::{
    error::Result,
    http::{ApiResponse, PaystackClient, Transport},
    params::{filter_allowed, require_fields, to_query},
};

/// Transfer façade.
///
/// Single and bulk initiation both accept amounts in major units; bulk
/// conversion is applied per item.
#[derive(Debug)]
pub struct Transfer<'a, T: Transport> {
    client: &'a PaystackClient<T>,
}

impl<'a, T: Transport> Transfer<'a, T> {
    pub(crate) fn new(client: &'a PaystackClient<T>) -> Self {
        Self { client }
    }

    /// Initiates a transfer. Requires `source`, `amount` (major units), and
    /// `recipient`.
    ///
    /// # Errors
    ///
    /// Returns [`MissingParams`](crate::PaystackError::MissingParams) when a
    /// required field is absent, otherwise the classified pipeline error.
    pub async fn initiate(&self, data: Value) -> Result<ApiResponse> {
        let mut params = into_params(data);
        require_fields(&params, &["source", "amount", "recipient"])?;
        convert_amount_field(&mut params, "amount");
        let params = filter_allowed(
            &params,
            &["source", "amount", "recipient", "reason", "currency", "reference", "metadata"],
        );
        self.client.post("/transfer", Value::Object(params)).await
    }

    /// Initiates a batch of transfers. Requires `source` and `transfers`;
    /// each item's `amount` is converted to subunits.
    ///
    /// # Errors
    ///
    /// Returns [`MissingParams`](crate::PaystackError::MissingParams) when a
    /// required field is absent, otherwise the classified pipeline error.
    pub async fn bulk_initiate(&self, data: Value) -> Result<ApiResponse> {
        let mut params = into_params(data);
        require_fields(&params, &["source", "transfers"])?;

        if let Some(Value::Array(transfers)) = params.get_mut("transfers") {
            for item in transfers {
                if let Value::Object(entry) = item {
                    convert_amount_field(entry, "amount");
                }
            }
        }

        self.client.post("/transfer/bulk", Value::Object(params)).await
    }

    /// Lists transfers.
    ///
    /// # Errors
    ///
    /// Returns the classified pipeline error.
    pub async fn list(&self, params: Value) -> Result<ApiResponse> {
        let query = to_query(&filter_allowed(
            &into_params(params),
            &["perPage", "page", "from", "to", "customer"],
        ));
        self.client.get("/transfer", query).await
    }

    /// Fetches a transfer by ID or code.
    ///
    /// # Errors
    ///
    /// Returns the classified pipeline error.
    pub async fn fetch(&self, id_or_code: &str) -> Result<ApiResponse> {
        self.client.get(&format!("/transfer/{id_or_code}"), vec![]).await
    }

    /// Finalizes an OTP-gated transfer. Requires `transfer_code` and `otp`.
    ///
    /// # Errors
    ///
    /// Returns [`MissingParams`](crate::PaystackError::MissingParams) when a
    /// required field is absent, otherwise the classified pipeline error.
    pub async fn finalize(&self, data: Value) -> Result<ApiResponse> {
        let params = into_params(data);
        require_fields(&params, &["transfer_code", "otp"])?;
        let params = filter_allowed(&params, &["transfer_code", "otp"]);
        self.client.post("/transfer/finalize_transfer", Value::Object(params)).await
    }

    /// Verifies a transfer by its reference.
    ///
    /// # Errors
    ///
    /// Returns the classified pipeline error.
    pub async fn verify(&self, reference: &str) -> Result<ApiResponse> {
        self.client.get(&format!("/transfer/verify/{reference}"), vec![]).await
    }

    /// Resends the transfer OTP. Requires `transfer_code` and `reason`.
    ///
    /// # Errors
    ///
    /// Returns [`MissingParams`](crate::PaystackError::MissingParams) when a
    /// required field is absent, otherwise the classified pipeline error.
    pub async fn resend_otp(&self, data: Value) -> Result<ApiResponse> {
        let params = into_params(data);
        require_fields(&params, &["transfer_code", "reason"])?;
        let params = filter_allowed(&params, &["transfer_code", "reason"]);
        self.client.post("/transfer/resend_otp", Value::Object(params)).await
    }

    /// Starts disabling the OTP requirement for transfers.
    ///
    /// # Errors
    ///
    /// Returns the classified pipeline error.
    pub async fn disable_otp(&self) -> Result<ApiResponse> {
        self.client.post("/transfer/disable_otp", serde_json::json!({})).await
    }

    /// Completes disabling the OTP requirement. Requires `otp`.
    ///
    /// # Errors
    ///
    /// Returns [`MissingParams`](crate::PaystackError::MissingParams) when
    /// `otp` is absent, otherwise the classified pipeline error.
    pub async fn finalize_disable_otp(&self, data: Value) -> Result<ApiResponse> {
        let params = into_params(data);
        require_fields(&params, &["otp"])?;
        self.client.post("/transfer/disable_otp_finalize", Value::Object(params)).await
    }

    /// Re-enables the OTP requirement for transfers.
    ///
    /// # Errors
    ///
    /// Returns the classified pipeline error.
    pub async fn enable_otp(&self) -> Result<ApiResponse> {
        self.client.post("/transfer/enable_otp", serde_json::json!({})).await
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
    async fn initiate_converts_amount() {
        let client = client();
        mock(&client).push_json(200, ok_body());

        client
            .transfers()
            .initiate(json!({
                "source": "balance",
                "amount": 250.75,
                "recipient": "RCP_1"
            }))
            .await
            .unwrap();

        let request = mock(&client).request(0);
        assert_eq!(request.path, "/transfer");
        assert_eq!(request.body.unwrap()["amount"], json!(25075));
    }

    #[tokio::test]
    async fn bulk_initiate_converts_each_item_amount() {
        let client = client();
        mock(&client).push_json(200, ok_body());

        client
            .transfers()
            .bulk_initiate(json!({
                "source": "balance",
                "transfers": [
                    { "amount": 100.0, "recipient": "RCP_1" },
                    { "amount": 50.5, "recipient": "RCP_2" }
                ]
            }))
            .await
            .unwrap();

        let body = mock(&client).request(0).body.unwrap();
        assert_eq!(body["transfers"][0]["amount"], json!(10000));
        assert_eq!(body["transfers"][1]["amount"], json!(5050));
    }

    #[tokio::test]
    async fn otp_toggle_endpoints_post_empty_bodies() {
        let client = client();
        mock(&client).push_json(200, ok_body());
        mock(&client).push_json(200, ok_body());

        client.transfers().disable_otp().await.unwrap();
        client.transfers().enable_otp().await.unwrap();

        assert_eq!(mock(&client).request(0).path, "/transfer/disable_otp");
        assert_eq!(mock(&client).request(1).path, "/transfer/enable_otp");
    }

    #[tokio::test]
    async fn finalize_requires_code_and_otp() {
        let client = client();
        assert!(client.transfers().finalize(json!({ "transfer_code": "TRF_1" })).await.is_err());
        assert_eq!(mock(&client).request_count(), 0);
    }
}
