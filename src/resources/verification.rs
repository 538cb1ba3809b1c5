//! Account, card BIN, and BVN verification operations.

use std::time::Duration;

use serde_json::Value;

use super::{DAY, into_params};
use crate::{
    cache::list_key,
    error::Result,
    http::{ApiResponse, PaystackClient, Transport},
    params::{filter_allowed, require_fields, to_query},
};

/// Verification façade.
///
/// Card BIN and address-state lookups are reference data and cached
/// aggressively; identity checks always hit the API.
#[derive(Debug)]
pub struct Verification<'a, T: Transport> {
    client: &'a PaystackClient<T>,
}

impl<'a, T: Transport> Verification<'a, T> {
    pub(crate) fn new(client: &'a PaystackClient<T>) -> Self {
        Self { client }
    }

    /// Resolves an account number to its account name.
    ///
    /// Requires `account_number` and `bank_code`.
    ///
    /// # Errors
    ///
    /// Returns [`MissingParams`](crate::PaystackError::MissingParams) when a
    /// required field is absent, otherwise the classified pipeline error.
    pub async fn resolve_account_number(&self, data: Value) -> Result<ApiResponse> {
        let params = into_params(data);
        require_fields(&params, &["account_number", "bank_code"])?;
        let query = to_query(&filter_allowed(&params, &["account_number", "bank_code"]));
        self.client.get("/bank/resolve", query).await
    }

    /// Validates an account against identity documents.
    ///
    /// Requires `account_name`, `account_number`, `account_type`,
    /// `bank_code`, `country_code`, and `document_type`.
    ///
    /// # Errors
    ///
    /// Returns [`MissingParams`](crate::PaystackError::MissingParams) when a
    /// required field is absent, otherwise the classified pipeline error.
    pub async fn validate_account(&self, data: Value) -> Result<ApiResponse> {
        let params = into_params(data);
        require_fields(
            &params,
            &[
                "account_name",
                "account_number",
                "account_type",
                "bank_code",
                "country_code",
                "document_type",
            ],
        )?;
        let params = filter_allowed(
            &params,
            &[
                "account_name",
                "account_number",
                "account_type",
                "bank_code",
                "country_code",
                "document_type",
                "document_number",
            ],
        );
        self.client.post("/bank/validate", Value::Object(params)).await
    }

    /// Resolves a card BIN. Cached for 24 hours; BIN metadata is static.
    ///
    /// # Errors
    ///
    /// Returns the classified pipeline error.
    pub async fn resolve_card_bin(&self, bin: &str) -> Result<ApiResponse> {
        let key = format!("card_bin:{bin}");
        let path = format!("/decision/bin/{bin}");
        self.client
            .cache()
            .get_or_compute(&key, Some(DAY), || self.client.get(&path, vec![]))
            .await
    }

    /// Matches a BVN against an account.
    ///
    /// Requires `bvn`, `account_number`, and `bank_code`.
    ///
    /// # Errors
    ///
    /// Returns [`MissingParams`](crate::PaystackError::MissingParams) when a
    /// required field is absent, otherwise the classified pipeline error.
    pub async fn match_bvn(&self, data: Value) -> Result<ApiResponse> {
        let params = into_params(data);
        require_fields(&params, &["bvn", "account_number", "bank_code"])?;
        let params = filter_allowed(
            &params,
            &["bvn", "account_number", "bank_code", "first_name", "last_name"],
        );
        self.client.post("/bvn/match", Value::Object(params)).await
    }

    /// Resolves a BVN.
    ///
    /// # Errors
    ///
    /// Returns the classified pipeline error.
    pub async fn resolve_bvn(&self, bvn: &str) -> Result<ApiResponse> {
        self.client.get(&format!("/bvn/resolve/{bvn}"), vec![]).await
    }

    /// Lists states usable for address verification. Cached per query.
    ///
    /// # Errors
    ///
    /// Returns the classified pipeline error.
    pub async fn address_states(&self, params: Value) -> Result<ApiResponse> {
        let query =
            to_query(&filter_allowed(&into_params(params), &["type", "country", "currency"]));
        let key = list_key("address_states", &query);
        self.client
            .cache()
            .get_or_compute(&key, Some(Duration::from_secs(3600)), || {
                self.client.get("/address_verification/states", query)
            })
            .await
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
    async fn resolve_account_number_sends_query_not_body() {
        let client = client();
        mock(&client).push_json(200, ok_body());

        client
            .verification()
            .resolve_account_number(json!({
                "account_number": "0001234567",
                "bank_code": "058"
            }))
            .await
            .unwrap();

        let request = mock(&client).request(0);
        assert_eq!(request.path, "/bank/resolve");
        assert!(request.body.is_none());
        assert!(request.query.contains(&("account_number".to_owned(), "0001234567".to_owned())));
    }

    #[tokio::test]
    async fn card_bin_is_cached_across_calls() {
        let client = client();
        mock(&client).push_json(200, ok_body());

        client.verification().resolve_card_bin("539983").await.unwrap();
        client.verification().resolve_card_bin("539983").await.unwrap();

        assert_eq!(mock(&client).request_count(), 1);
        assert_eq!(mock(&client).request(0).path, "/decision/bin/539983");
    }

    #[tokio::test]
    async fn match_bvn_requires_identity_triple() {
        let client = client();
        let err = client.verification().match_bvn(json!({ "bvn": "12345678901" })).await;
        assert!(err.is_err());
        assert_eq!(mock(&client).request_count(), 0);
    }
}
