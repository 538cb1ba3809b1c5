//! Paystack API client.
//!
//! A typed client for the [Paystack](https://paystack.com) payment API:
//! a single request pipeline with deterministic error classification,
//! major-to-subunit amount handling, response caching for read-mostly
//! endpoints, HMAC-SHA512 webhook verification, and per-resource façades
//! for transactions, customers, plans, subscriptions, transfers, refunds,
//! disputes, verification, and reference data.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use paystack_client::{PaystackClient, PaystackConfig};
//! use serde_json::json;
//!
//! # async fn example() -> paystack_client::Result<()> {
//! let client = PaystackClient::new(PaystackConfig::new("sk_test_abc123"))?;
//!
//! // Amounts are in major units; conversion to subunits is automatic.
//! let init = client
//!     .transactions()
//!     .initialize(json!({
//!         "email": "customer@example.com",
//!         "amount": 100.50,
//!     }))
//!     .await?;
//! println!("pay at {}", init.data["authorization_url"]);
//!
//! let verified = client.transactions().verify("PS_1700000000_abc").await?;
//! assert!(verified.status);
//! # Ok(())
//! # }
//! ```
//!
//! # Webhooks
//!
//! ```rust
//! use paystack_client::webhook::{EventDispatcher, WebhookHandler};
//!
//! # fn example(raw_body: &[u8], signature: Option<&str>) -> paystack_client::Result<()> {
//! let handler = WebhookHandler::new("sk_test_abc123")?;
//! let payload = handler.parse(raw_body, signature)?;
//!
//! EventDispatcher::new()
//!     .on("charge.success", |payload| {
//!         // fulfil the order
//!         let _ = &payload.data["reference"];
//!     })
//!     .dispatch(&payload);
//! # Ok(())
//! # }
//! ```
//!
//! # Error handling
//!
//! Every failure is one kind of [`PaystackError`]; [`user_message`] gives
//! text safe for end users, [`suggestion`] gives remediation guidance, and
//! [`should_retry`] reports whether the failure is transient.
//!
//! [`user_message`]: PaystackError::user_message
//! [`suggestion`]: PaystackError::suggestion
//! [`should_retry`]: PaystackError::should_retry

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod amount;
pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod params;
pub mod resources;
pub mod support;
pub mod webhook;

pub use config::{CacheConfig, LoggingConfig, PaystackConfig};
pub use error::{NetworkErrorKind, PaystackError, Result};
pub use http::{
    ApiRequest, ApiResponse, HttpMethod, HttpTransport, PaystackClient, RawResponse, Transport,
};
pub use webhook::{EventDispatcher, SIGNATURE_HEADER, WebhookHandler, WebhookPayload};
