//! HTTP request pipeline.
//!
//! Every API call flows through one path: build an [`ApiRequest`], log it
//! (redacted), execute it over the [`Transport`], then interpret the raw
//! response — non-2xx statuses and `status: false` bodies are classified
//! into exactly one [`PaystackError`](crate::PaystackError) kind, successes
//! are decoded into the [`ApiResponse`] envelope.
//!
//! The [`Transport`] seam separates protocol mechanics from interpretation:
//! [`HttpTransport`] is the reqwest-backed production implementation, and
//! any in-process implementation can stand in for tests.

#[allow(
    redundant_imports,
    reason = "Future needed for RPITIT despite being in Edition 2024 prelude"
)]
use std::future::Future;

use reqwest::header::{ACCEPT, AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use crate::{
    cache::ResponseCache,
    config::PaystackConfig,
    error::{PaystackError, Result},
    resources::{
        Customer, Dispute, Miscellaneous, Plan, Refund, Subscription, Transaction, Transfer,
        Verification,
    },
};

pub mod classify;
pub(crate) mod redact;

/// HTTP method for an API request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET request.
    Get,
    /// POST request.
    Post,
    /// PUT request.
    Put,
    /// DELETE request.
    Delete,
}

impl HttpMethod {
    /// Returns the method as its wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// A single API request before transport execution.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Path relative to the base URL (e.g. "/transaction/initialize").
    pub path: String,
    /// Query string pairs, appended in order.
    pub query: Vec<(String, String)>,
    /// JSON body, for methods that carry one.
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Builds a GET request for `path` with the given query pairs.
    #[must_use]
    pub fn get(path: impl Into<String>, query: Vec<(String, String)>) -> Self {
        Self { method: HttpMethod::Get, path: path.into(), query, body: None }
    }

    /// Builds a POST request for `path` with a JSON body.
    #[must_use]
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self { method: HttpMethod::Post, path: path.into(), query: Vec::new(), body: Some(body) }
    }

    /// Builds a PUT request for `path` with a JSON body.
    #[must_use]
    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self { method: HttpMethod::Put, path: path.into(), query: Vec::new(), body: Some(body) }
    }

    /// Builds a DELETE request for `path`.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self { method: HttpMethod::Delete, path: path.into(), query: Vec::new(), body: None }
    }
}

/// Raw response from a transport, before interpretation.
#[derive(Debug)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body bytes.
    pub body: Vec<u8>,
    /// Response headers as name/value pairs.
    pub headers: Vec<(String, String)>,
}

impl RawResponse {
    /// Looks up a header value by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

fn default_envelope_status() -> bool {
    true
}

/// The Paystack response envelope.
///
/// Every successful API response decodes into this shape. A missing `status`
/// field is treated as success; an explicit `status: false` never reaches
/// callers (the pipeline classifies it into an error first).
///
/// Serializable so cached responses can round-trip through a
/// [`CacheStore`](crate::cache::CacheStore).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Logical success flag from the API.
    #[serde(default = "default_envelope_status")]
    pub status: bool,
    /// Human-readable API message.
    #[serde(default)]
    pub message: String,
    /// Response payload; shape varies per endpoint.
    #[serde(default)]
    pub data: Value,
    /// Pagination metadata on list endpoints.
    #[serde(default)]
    pub meta: Option<Value>,
}

/// Transport abstraction for executing API requests.
///
/// [`HttpTransport`] is the production implementation. The trait is open so
/// tests (and embedders with special needs, e.g. a recording proxy) can
/// substitute their own.
pub trait Transport: Send + Sync {
    /// Executes the request and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns [`PaystackError::Network`](crate::PaystackError::Network) when
    /// no HTTP response was produced at all. Status interpretation is the
    /// pipeline's job, not the transport's.
    fn execute<'a>(
        &'a self,
        request: &'a ApiRequest,
    ) -> impl Future<Output = Result<RawResponse>> + Send + 'a;
}

/// Reqwest-backed transport.
///
/// The client is built once from [`PaystackConfig`] with the bearer
/// credential and JSON headers installed as defaults, distinct connect and
/// total timeouts, and the TLS-verification toggle applied.
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Creates a transport from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PaystackError::Config`] if the secret key cannot form a
    /// valid header value or the underlying client fails to build.
    pub fn new(config: &PaystackConfig) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.secret_key))
            .map_err(|e| PaystackError::Config(format!("secret key is not header-safe: {e}")))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout());

        if !config.verify_tls {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder
            .build()
            .map_err(|e| PaystackError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url: config.base_url.trim_end_matches('/').to_owned() })
    }
}

impl Transport for HttpTransport {
    async fn execute<'a>(&'a self, request: &'a ApiRequest) -> Result<RawResponse> {
        let url = format!("{}{}", self.base_url, request.path);

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(classify::network_failure)?;

        let status = response.status().as_u16();
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_owned()))
            .collect();
        let body = response.bytes().await.map_err(classify::network_failure)?.to_vec();

        Ok(RawResponse { status, body, headers })
    }
}

/// Paystack API client.
///
/// Generic over the [`Transport`] so the full pipeline is exercisable
/// without a network; production use goes through [`PaystackClient::new`],
/// which wires up [`HttpTransport`].
///
/// # Examples
///
/// ```rust,no_run
/// use paystack_client::{PaystackClient, PaystackConfig};
/// use serde_json::json;
///
/// # async fn example() -> paystack_client::Result<()> {
/// let client = PaystackClient::new(PaystackConfig::new("sk_test_abc123"))?;
///
/// let response = client
///     .transactions()
///     .initialize(json!({
///         "email": "customer@example.com",
///         "amount": 100.50,
///     }))
///     .await?;
///
/// println!("authorization URL: {}", response.data["authorization_url"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PaystackClient<T: Transport = HttpTransport> {
    transport: T,
    config: PaystackConfig,
    cache: ResponseCache,
}

impl PaystackClient<HttpTransport> {
    /// Creates a client with the reqwest transport.
    ///
    /// # Errors
    ///
    /// Returns [`PaystackError::Config`] if the configuration fails
    /// validation or the HTTP client cannot be built.
    pub fn new(config: PaystackConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> PaystackClient<T> {
    /// Creates a client over a caller-supplied transport.
    ///
    /// # Errors
    ///
    /// Returns [`PaystackError::Config`] if the configuration fails
    /// validation.
    pub fn with_transport(config: PaystackConfig, transport: T) -> Result<Self> {
        config.validate()?;
        let cache = ResponseCache::new(&config.cache);
        Ok(Self { transport, config, cache })
    }

    /// Returns the client configuration.
    #[must_use]
    pub fn config(&self) -> &PaystackConfig {
        &self.config
    }

    pub(crate) fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    #[cfg(test)]
    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    /// Executes a GET request.
    ///
    /// # Errors
    ///
    /// Returns the classified [`PaystackError`] for any failure.
    pub async fn get(&self, path: &str, query: Vec<(String, String)>) -> Result<ApiResponse> {
        self.send(ApiRequest::get(path, query)).await
    }

    /// Executes a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns the classified [`PaystackError`] for any failure.
    pub async fn post(&self, path: &str, body: Value) -> Result<ApiResponse> {
        self.send(ApiRequest::post(path, body)).await
    }

    /// Executes a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns the classified [`PaystackError`] for any failure.
    pub async fn put(&self, path: &str, body: Value) -> Result<ApiResponse> {
        self.send(ApiRequest::put(path, body)).await
    }

    /// Executes a DELETE request.
    ///
    /// # Errors
    ///
    /// Returns the classified [`PaystackError`] for any failure.
    pub async fn delete(&self, path: &str) -> Result<ApiResponse> {
        self.send(ApiRequest::delete(path)).await
    }

    /// Executes a prepared request through the full pipeline.
    ///
    /// # Errors
    ///
    /// Returns the classified [`PaystackError`] for any failure: transport
    /// errors become `Network`, non-2xx statuses go through the status
    /// table, and 2xx bodies with `status: false` go through body
    /// classification.
    #[instrument(
        skip(self, request),
        fields(method = request.method.as_str(), path = %request.path)
    )]
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.log_request(&request);
        let raw = self.transport.execute(&request).await?;
        self.interpret(&raw)
    }

    fn interpret(&self, raw: &RawResponse) -> Result<ApiResponse> {
        let body: Option<Value> = serde_json::from_slice(&raw.body).ok();

        if !(200..300).contains(&raw.status) {
            return Err(classify::transport_failure(raw, body));
        }

        let body = body.ok_or_else(|| PaystackError::Api {
            message: "response body was not valid JSON".to_owned(),
            code: raw.status,
            response: None,
        })?;

        // A logical failure can hide inside a 2xx response.
        if body.get("status").and_then(Value::as_bool) == Some(false) {
            return Err(classify::body_failure(&body));
        }

        self.log_response(raw.status, &body);

        serde_json::from_value(body).map_err(|e| PaystackError::Api {
            message: format!("response envelope could not be decoded: {e}"),
            code: raw.status,
            response: None,
        })
    }

    fn log_request(&self, request: &ApiRequest) {
        if !self.config.logging.enabled {
            return;
        }
        let body = request.body.as_ref().map(redact::redact).unwrap_or(Value::Null);
        tracing::info!(
            method = request.method.as_str(),
            path = %request.path,
            body = %body,
            "paystack api request"
        );
    }

    fn log_response(&self, status: u16, body: &Value) {
        if !self.config.logging.enabled {
            return;
        }
        tracing::info!(status, body = %redact::redact(body), "paystack api response");
    }

    /// Transaction operations.
    #[must_use]
    pub fn transactions(&self) -> Transaction<'_, T> {
        Transaction::new(self)
    }

    /// Customer operations.
    #[must_use]
    pub fn customers(&self) -> Customer<'_, T> {
        Customer::new(self)
    }

    /// Plan operations.
    #[must_use]
    pub fn plans(&self) -> Plan<'_, T> {
        Plan::new(self)
    }

    /// Subscription operations.
    #[must_use]
    pub fn subscriptions(&self) -> Subscription<'_, T> {
        Subscription::new(self)
    }

    /// Transfer operations.
    #[must_use]
    pub fn transfers(&self) -> Transfer<'_, T> {
        Transfer::new(self)
    }

    /// Refund operations.
    #[must_use]
    pub fn refunds(&self) -> Refund<'_, T> {
        Refund::new(self)
    }

    /// Dispute operations.
    #[must_use]
    pub fn disputes(&self) -> Dispute<'_, T> {
        Dispute::new(self)
    }

    /// Account, card BIN, and BVN verification operations.
    #[must_use]
    pub fn verification(&self) -> Verification<'_, T> {
        Verification::new(self)
    }

    /// Banks, countries, and states lookups.
    #[must_use]
    pub fn miscellaneous(&self) -> Miscellaneous<'_, T> {
        Miscellaneous::new(self)
    }
}
