//! Bank, country, and state lookups.
//!
//! Pure reference data, cached for 24 hours.

use serde_json::Value;

use super::{DAY, into_params};
use crate::{
    cache::list_key,
    error::Result,
    http::{ApiResponse, PaystackClient, Transport},
    params::{filter_allowed, to_query},
};

/// Reference-data façade.
#[derive(Debug)]
pub struct Miscellaneous<'a, T: Transport> {
    client: &'a PaystackClient<T>,
}

impl<'a, T: Transport> Miscellaneous<'a, T> {
    pub(crate) fn new(client: &'a PaystackClient<T>) -> Self {
        Self { client }
    }

    /// Lists supported banks. Cached per query for 24 hours.
    ///
    /// # Errors
    ///
    /// Returns the classified pipeline error.
    pub async fn list_banks(&self, params: Value) -> Result<ApiResponse> {
        let query = to_query(&filter_allowed(
            &into_params(params),
            &["country", "use_cursor", "perPage", "next", "previous", "gateway", "type", "currency"],
        ));
        let key = list_key("banks", &query);
        self.client
            .cache()
            .get_or_compute(&key, Some(DAY), || self.client.get("/bank", query))
            .await
    }

    /// Lists supported countries. Cached for 24 hours.
    ///
    /// # Errors
    ///
    /// Returns the classified pipeline error.
    pub async fn list_countries(&self) -> Result<ApiResponse> {
        self.client
            .cache()
            .get_or_compute("countries", Some(DAY), || self.client.get("/country", vec![]))
            .await
    }

    /// Lists states for a country. Cached for 24 hours.
    ///
    /// # Errors
    ///
    /// Returns the classified pipeline error.
    pub async fn list_states(&self, country: &str) -> Result<ApiResponse> {
        let key = format!("states:{country}");
        let query = vec![("country".to_owned(), country.to_owned())];
        self.client
            .cache()
            .get_or_compute(&key, Some(DAY), || {
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

    fn banks_body() -> serde_json::Value {
        json!({
            "status": true,
            "message": "Banks retrieved",
            "data": [{ "name": "GTBank", "code": "058" }]
        })
    }

    #[tokio::test]
    async fn banks_are_cached_per_country() {
        let client = client();
        mock(&client).push_json(200, banks_body());
        mock(&client).push_json(200, banks_body());

        client.miscellaneous().list_banks(json!({ "country": "nigeria" })).await.unwrap();
        client.miscellaneous().list_banks(json!({ "country": "nigeria" })).await.unwrap();
        client.miscellaneous().list_banks(json!({ "country": "ghana" })).await.unwrap();

        assert_eq!(mock(&client).request_count(), 2);
    }

    #[tokio::test]
    async fn cached_banks_round_trip_the_envelope() {
        let client = client();
        mock(&client).push_json(200, banks_body());

        let first = client.miscellaneous().list_banks(json!({})).await.unwrap();
        let second = client.miscellaneous().list_banks(json!({})).await.unwrap();

        assert_eq!(first.data, second.data);
        assert_eq!(second.message, "Banks retrieved");
        assert!(second.status);
    }

    #[tokio::test]
    async fn states_lookup_sends_country_query() {
        let client = client();
        mock(&client).push_json(200, json!({ "status": true, "data": [] }));

        client.miscellaneous().list_states("NG").await.unwrap();

        let request = mock(&client).request(0);
        assert_eq!(request.path, "/address_verification/states");
        assert_eq!(request.query, vec![("country".to_owned(), "NG".to_owned())]);
    }
}
