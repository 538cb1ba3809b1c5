//! Error types for Paystack API operations.
//!
//! Every failure in this crate is one kind of [`PaystackError`]. The enum is a
//! closed taxonomy: the request pipeline classifies each failure exactly once
//! (body classification for logical failures, status/transport classification
//! otherwise) and attaches the first matching kind.
//!
//! Two renderings are available on every kind:
//!
//! - [`PaystackError::user_message`] — sanitized text safe to show end users.
//! - [`PaystackError::suggestion`] — remediation text for operators and logs.
//!
//! # Examples
//!
//! ```
//! use paystack_client::PaystackError;
//!
//! let err = PaystackError::RateLimit {
//!     message: "Rate limit exceeded. Please try again later.".to_owned(),
//!     retry_after_secs: Some(90),
//!     limit: Some(100),
//!     remaining: Some(0),
//! };
//!
//! assert_eq!(err.user_message(), "Rate limit exceeded. Please try again in 2 minute(s).");
//! assert!(err.should_retry());
//! ```

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

/// Result type alias for Paystack operations.
pub type Result<T> = std::result::Result<T, PaystackError>;

/// Subkind of a transport-level network failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkErrorKind {
    /// The request or connection timed out.
    Timeout,
    /// The connection could not be established (DNS, refused, reset).
    Connection,
    /// TLS negotiation or certificate verification failed.
    Tls,
}

impl NetworkErrorKind {
    /// Classifies a transport error from its message text.
    ///
    /// Checks are ordered: timeout, connection, TLS. Anything unrecognized
    /// falls back to [`NetworkErrorKind::Connection`].
    pub(crate) fn from_message(message: &str) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("timeout") || lower.contains("timed out") {
            Self::Timeout
        } else if lower.contains("connection") || lower.contains("could not connect") {
            Self::Connection
        } else if lower.contains("ssl") || lower.contains("certificate") {
            Self::Tls
        } else {
            Self::Connection
        }
    }
}

/// Errors raised by the Paystack client.
///
/// API-failure kinds (`Authentication` through `Api`) are produced by the
/// classifier in the request pipeline; the remaining kinds are produced
/// locally (parameter validation, configuration, webhook verification).
///
/// `code` fields carry the HTTP status when classification came from a
/// transport failure, or the API's own numeric code when classification came
/// from a response body; 0 means no code was available.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum PaystackError {
    /// API authentication failed (invalid or missing secret key).
    #[error("authentication failed: {message}")]
    Authentication {
        /// Raw API message.
        message: String,
        /// Numeric code (HTTP status or API code).
        code: u16,
        /// Raw response body, when one was available.
        response: Option<Value>,
    },

    /// Request parameters were rejected by the API.
    #[error("validation failed: {message}")]
    Validation {
        /// Raw API message.
        message: String,
        /// Numeric code (HTTP status or API code).
        code: u16,
        /// Per-field error messages lifted from the response body.
        errors: HashMap<String, Vec<String>>,
        /// Raw response body, when one was available.
        response: Option<Value>,
    },

    /// The requested resource does not exist.
    #[error("resource not found: {message}")]
    NotFound {
        /// Raw API message.
        message: String,
        /// Resource family, when known (e.g. "transaction").
        resource_type: Option<String>,
        /// Resource identifier, when known.
        resource_id: Option<String>,
    },

    /// API rate limits were exceeded.
    #[error("rate limit exceeded: {message}")]
    RateLimit {
        /// Raw API message.
        message: String,
        /// Seconds to wait before retrying, from the `Retry-After` header.
        retry_after_secs: Option<u64>,
        /// Request quota, from the `x-ratelimit-limit` header.
        limit: Option<u64>,
        /// Remaining requests, from the `x-ratelimit-remaining` header.
        remaining: Option<u64>,
    },

    /// The transport failed without producing an HTTP response.
    #[error("network error: {message}")]
    Network {
        /// Underlying transport error text.
        message: String,
        /// Failure subkind derived from the transport error.
        kind: NetworkErrorKind,
    },

    /// The API returned a 5xx server error.
    #[error("server error ({code}): {message}")]
    Server {
        /// Raw API message.
        message: String,
        /// HTTP status code.
        code: u16,
        /// Whether the API reported scheduled maintenance (503 or message).
        maintenance: bool,
    },

    /// Any API failure not covered by a more specific kind.
    #[error("API error ({code}): {message}")]
    Api {
        /// Raw API message.
        message: String,
        /// Numeric code (HTTP status or API code; 0 if unknown).
        code: u16,
        /// Raw response body, when one was available.
        response: Option<Value>,
    },

    /// Required request parameters were absent or empty.
    ///
    /// Carries the complete missing set, not just the first offender.
    #[error("missing required parameters: {}", fields.join(", "))]
    MissingParams {
        /// Names of every absent or empty required field.
        fields: Vec<String>,
    },

    /// The client configuration is invalid; raised at construction.
    #[error("configuration error: {0}")]
    Config(String),

    /// Webhook signature verification failed or the header was absent.
    #[error("invalid webhook signature")]
    InvalidWebhookSignature,

    /// Webhook body was not valid JSON.
    #[error("invalid JSON payload: {0}")]
    InvalidWebhookPayload(String),
}

impl PaystackError {
    /// Returns the numeric code associated with this error, or 0.
    #[must_use]
    pub fn code(&self) -> u16 {
        match self {
            Self::Authentication { code, .. }
            | Self::Validation { code, .. }
            | Self::Server { code, .. }
            | Self::Api { code, .. } => *code,
            Self::NotFound { .. } => 404,
            Self::RateLimit { .. } => 429,
            Self::MissingParams { .. } => 400,
            Self::Network { .. }
            | Self::Config(_)
            | Self::InvalidWebhookSignature
            | Self::InvalidWebhookPayload(_) => 0,
        }
    }

    /// Returns a sanitized message safe to surface to end users.
    ///
    /// Distinct from the raw API message carried in the error itself.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Authentication { .. } => {
                "Payment authorization failed. Please contact support.".to_owned()
            }
            Self::Validation { errors, .. } => errors
                .values()
                .flat_map(|messages| messages.first())
                .next()
                .cloned()
                .unwrap_or_else(|| "The provided data is invalid.".to_owned()),
            Self::NotFound { resource_type, .. } => match resource_type {
                Some(kind) => {
                    let mut label = kind.clone();
                    if let Some(first) = label.get_mut(..1) {
                        first.make_ascii_uppercase();
                    }
                    format!("{label} not found. Please check and try again.")
                }
                None => "The requested resource was not found.".to_owned(),
            },
            Self::RateLimit { retry_after_secs, .. } => match retry_after_secs {
                Some(secs) if *secs > 0 => {
                    let minutes = secs.div_ceil(60);
                    format!("Rate limit exceeded. Please try again in {minutes} minute(s).")
                }
                _ => "Too many requests. Please try again later.".to_owned(),
            },
            Self::Network { .. } => {
                "Connection issue. Please check your internet and try again.".to_owned()
            }
            Self::Server { maintenance, .. } => {
                if *maintenance {
                    "Payment system is temporarily unavailable. Please try again shortly."
                        .to_owned()
                } else {
                    "A temporary error occurred. Please try again in a moment.".to_owned()
                }
            }
            Self::MissingParams { .. } => "Some required information is missing.".to_owned(),
            Self::Api { .. }
            | Self::Config(_)
            | Self::InvalidWebhookSignature
            | Self::InvalidWebhookPayload(_) => {
                "An error occurred while processing your payment.".to_owned()
            }
        }
    }

    /// Returns remediation text for operators. Not intended for end users.
    #[must_use]
    pub fn suggestion(&self) -> String {
        match self {
            Self::Authentication { .. } => "Verify that your Paystack secret key is correct and \
                                            that you are using the right key for your environment \
                                            (test vs live)."
                .to_owned(),
            Self::Validation { errors, .. } => {
                if errors.is_empty() {
                    "Check the request parameters against the Paystack API reference.".to_owned()
                } else {
                    let fields: Vec<&str> = errors.keys().map(String::as_str).collect();
                    format!("Fix the rejected fields and retry: {}.", fields.join(", "))
                }
            }
            Self::NotFound { resource_type, resource_id, .. } => {
                match (resource_type, resource_id) {
                    (Some(kind), Some(id)) => format!(
                        "The {kind} with ID '{id}' was not found. Please check the ID and try \
                         again."
                    ),
                    _ => "Verify that the resource exists and you have access to it.".to_owned(),
                }
            }
            Self::RateLimit { .. } => "Implement exponential backoff in your application or \
                                       reduce the frequency of API calls. Consider caching \
                                       frequently accessed data."
                .to_owned(),
            Self::Network { kind, .. } => match kind {
                NetworkErrorKind::Timeout => "The request timed out. Check your internet \
                                              connection or increase the timeout value in the \
                                              client configuration."
                    .to_owned(),
                NetworkErrorKind::Connection => "Could not connect to the Paystack API. Check \
                                                 your internet connection and firewall settings."
                    .to_owned(),
                NetworkErrorKind::Tls => "TLS certificate verification failed. Ensure TLS \
                                          verification is enabled and certificates are up to \
                                          date."
                    .to_owned(),
            },
            Self::Server { maintenance, .. } => {
                if *maintenance {
                    "The Paystack API is currently under maintenance. Please try again later."
                        .to_owned()
                } else {
                    "The Paystack API encountered an error. This is temporary - please try again \
                     in a few moments. If the problem persists, contact Paystack support."
                        .to_owned()
                }
            }
            Self::MissingParams { fields } => {
                format!("Provide values for the required fields: {}.", fields.join(", "))
            }
            Self::Config(_) => {
                "Fix the client configuration before issuing requests.".to_owned()
            }
            Self::InvalidWebhookSignature => "Confirm the webhook secret matches the one \
                                              configured on your Paystack dashboard and that the \
                                              raw request body was passed through unmodified."
                .to_owned(),
            Self::InvalidWebhookPayload(_) => {
                "Inspect the raw webhook body; the sender did not deliver valid JSON.".to_owned()
            }
            Self::Api { .. } => {
                "Inspect the raw response attached to this error for details.".to_owned()
            }
        }
    }

    /// Whether retrying the same call may succeed without any change.
    ///
    /// Retry policy itself is a consumer decision; this only reports whether
    /// the failure kind is transient.
    #[must_use]
    pub fn should_retry(&self) -> bool {
        match self {
            Self::RateLimit { retry_after_secs, .. } => {
                retry_after_secs.is_some_and(|secs| secs > 0)
            }
            Self::Network { kind, .. } => {
                matches!(kind, NetworkErrorKind::Timeout | NetworkErrorKind::Connection)
            }
            Self::Server { .. } => true,
            _ => false,
        }
    }

    /// Returns the raw API response body attached to this error, if any.
    #[must_use]
    pub fn response(&self) -> Option<&Value> {
        match self {
            Self::Authentication { response, .. }
            | Self::Validation { response, .. }
            | Self::Api { response, .. } => response.as_ref(),
            _ => None,
        }
    }

    /// Flattens validation field errors into a single message list.
    ///
    /// Empty for every other kind.
    #[must_use]
    pub fn validation_messages(&self) -> Vec<&str> {
        match self {
            Self::Validation { errors, .. } => {
                errors.values().flatten().map(String::as_str).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Returns the first validation message, if this is a validation error
    /// with field details.
    #[must_use]
    pub fn first_validation_message(&self) -> Option<&str> {
        match self {
            Self::Validation { errors, .. } => {
                errors.values().flatten().next().map(String::as_str)
            }
            _ => None,
        }
    }

    /// Returns how long to wait before retrying a rate-limited call.
    ///
    /// `None` when the error is not a rate limit or the server sent no
    /// `Retry-After`.
    #[must_use]
    pub fn retry_time(&self) -> Option<std::time::Duration> {
        match self {
            Self::RateLimit { retry_after_secs: Some(secs), .. } if *secs > 0 => {
                Some(std::time::Duration::from_secs(*secs))
            }
            _ => None,
        }
    }
}
