//! Webhook signature verification and event dispatch.
//!
//! Paystack signs each webhook delivery with HMAC-SHA512 over the exact raw
//! request body, hex-encoded in the `X-Paystack-Signature` header.
//! [`WebhookHandler::verify`] checks that signature with a constant-time
//! comparison and fails closed when the header is absent; [`parse`] only
//! touches the JSON after verification has passed.
//!
//! Delivery is at-least-once upstream, so handlers registered on
//! [`EventDispatcher`] must tolerate seeing the same event twice.
//!
//! [`parse`]: WebhookHandler::parse
//!
//! # Examples
//!
//! ```
//! use paystack_client::webhook::{EventDispatcher, WebhookHandler};
//!
//! # fn example(body: &[u8], signature: Option<&str>) -> paystack_client::Result<()> {
//! let handler = WebhookHandler::new("sk_test_abc123")?;
//! let payload = handler.parse(body, signature)?;
//!
//! let dispatcher = EventDispatcher::new()
//!     .on("charge.success", |payload| {
//!         println!("paid: {}", payload.data["reference"]);
//!     })
//!     .on_unknown(|payload| {
//!         println!("unhandled event: {:?}", payload.event);
//!     });
//!
//! dispatcher.dispatch(&payload);
//! # Ok(())
//! # }
//! ```

use std::{collections::HashMap, fmt};

use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha512;

use crate::{
    config::PaystackConfig,
    error::{PaystackError, Result},
};

type HmacSha512 = Hmac<Sha512>;

/// Header carrying the hex-encoded HMAC-SHA512 signature.
pub const SIGNATURE_HEADER: &str = "X-Paystack-Signature";

/// Verifies and parses inbound webhook deliveries.
#[derive(Clone)]
pub struct WebhookHandler {
    secret: String,
}

impl WebhookHandler {
    /// Creates a handler with the given signing secret.
    ///
    /// # Errors
    ///
    /// Returns [`PaystackError::Config`] if the secret is empty.
    pub fn new(secret: impl Into<String>) -> Result<Self> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(PaystackError::Config("webhook secret is not set".to_owned()));
        }
        Ok(Self { secret })
    }

    /// Creates a handler from client configuration.
    ///
    /// Uses the dedicated webhook secret when configured, otherwise the API
    /// secret key (Paystack signs webhooks with the integration's secret key
    /// by default).
    ///
    /// # Errors
    ///
    /// Returns [`PaystackError::Config`] if the resolved secret is empty.
    pub fn from_config(config: &PaystackConfig) -> Result<Self> {
        match &config.webhook_secret {
            Some(secret) => Self::new(secret.clone()),
            None => Self::new(config.secret_key.clone()),
        }
    }

    /// Checks a delivery's signature against the raw body bytes.
    ///
    /// Returns `false` when the header is absent, is not valid hex, or does
    /// not match. The comparison itself is constant-time.
    #[must_use]
    pub fn verify(&self, body: &[u8], signature: Option<&str>) -> bool {
        let Some(signature) = signature else {
            return false;
        };
        let Ok(expected) = hex::decode(signature.trim()) else {
            return false;
        };
        let Ok(mut mac) = HmacSha512::new_from_slice(self.secret.as_bytes()) else {
            return false;
        };
        mac.update(body);
        mac.verify_slice(&expected).is_ok()
    }

    /// Computes the hex signature this handler would accept for `body`.
    ///
    /// Useful for signing simulated deliveries in tests and staging.
    #[must_use]
    pub fn sign(&self, body: &[u8]) -> String {
        match HmacSha512::new_from_slice(self.secret.as_bytes()) {
            Ok(mut mac) => {
                mac.update(body);
                hex::encode(mac.finalize().into_bytes())
            }
            // Unreachable for HMAC (any key length is accepted).
            Err(_) => String::new(),
        }
    }

    /// Verifies the delivery and parses it into a [`WebhookPayload`].
    ///
    /// Verification always runs first; the body is never parsed as JSON
    /// unless the signature checks out.
    ///
    /// # Errors
    ///
    /// Returns [`PaystackError::InvalidWebhookSignature`] on a failed or
    /// missing signature, [`PaystackError::InvalidWebhookPayload`] when the
    /// verified body is not valid JSON.
    pub fn parse(&self, body: &[u8], signature: Option<&str>) -> Result<WebhookPayload> {
        if !self.verify(body, signature) {
            return Err(PaystackError::InvalidWebhookSignature);
        }

        let value: Value = serde_json::from_slice(body)
            .map_err(|e| PaystackError::InvalidWebhookPayload(e.to_string()))?;

        Ok(WebhookPayload {
            event: value.get("event").and_then(Value::as_str).map(str::to_owned),
            data: value.get("data").cloned().unwrap_or(Value::Null),
        })
    }
}

impl fmt::Debug for WebhookHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never expose the secret through Debug.
        f.debug_struct("WebhookHandler").finish_non_exhaustive()
    }
}

/// A verified, parsed webhook delivery.
#[derive(Debug, Clone)]
pub struct WebhookPayload {
    /// Event type (e.g. "charge.success"), when the body carried one.
    pub event: Option<String>,
    /// Event payload; `Null` when the body carried none.
    pub data: Value,
}

impl WebhookPayload {
    /// Returns the event type, if present.
    #[must_use]
    pub fn event_type(&self) -> Option<&str> {
        self.event.as_deref()
    }

    /// Whether this delivery is of the named event type.
    #[must_use]
    pub fn is_event(&self, name: &str) -> bool {
        self.event.as_deref() == Some(name)
    }
}

type Handler = Box<dyn Fn(&WebhookPayload) + Send + Sync>;

/// Table-driven router from event type to handler.
///
/// Stateless per dispatch: the table is built up front and only read
/// afterwards. Handlers must be idempotent; Paystack retries deliveries, so
/// the same event can arrive more than once.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: HashMap<String, Handler>,
    unknown: Option<Handler>,
}

impl EventDispatcher {
    /// Creates an empty dispatcher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for an event type, replacing any previous one.
    #[must_use]
    pub fn on(
        mut self,
        event: impl Into<String>,
        handler: impl Fn(&WebhookPayload) + Send + Sync + 'static,
    ) -> Self {
        self.handlers.insert(event.into(), Box::new(handler));
        self
    }

    /// Registers the fallback for events with no specific handler.
    #[must_use]
    pub fn on_unknown(
        mut self,
        handler: impl Fn(&WebhookPayload) + Send + Sync + 'static,
    ) -> Self {
        self.unknown = Some(Box::new(handler));
        self
    }

    /// Routes a payload to its handler.
    ///
    /// Returns `true` when a specifically registered handler ran; the
    /// fallback (if any) runs for everything else, including payloads with
    /// no event type at all.
    pub fn dispatch(&self, payload: &WebhookPayload) -> bool {
        if let Some(event) = payload.event_type()
            && let Some(handler) = self.handlers.get(event)
        {
            handler(payload);
            return true;
        }

        tracing::debug!(event = ?payload.event, "no handler registered for webhook event");
        if let Some(handler) = &self.unknown {
            handler(payload);
        }
        false
    }
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut events: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        events.sort_unstable();
        f.debug_struct("EventDispatcher")
            .field("events", &events)
            .field("has_unknown_handler", &self.unknown.is_some())
            .finish()
    }
}
