//! Client configuration.
//!
//! [`PaystackConfig`] is an explicit struct constructed once and passed into
//! the client, cache, and webhook handler; core logic never reaches for
//! ambient configuration. All fields carry serde defaults so the struct can
//! be deserialized from TOML (or any serde format) with only `secret_key`
//! provided.
//!
//! Validation is eager: [`PaystackConfig::validate`] runs at client
//! construction so a misconfigured client never issues a request.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{PaystackError, Result};

/// Default Paystack API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.paystack.co";

/// Configuration for [`PaystackClient`](crate::PaystackClient).
///
/// # Examples
///
/// ```
/// use paystack_client::PaystackConfig;
///
/// let config = PaystackConfig::new("sk_test_abc123");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PaystackConfig {
    /// Secret API key used as the bearer credential.
    pub secret_key: String,

    /// API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Default currency code (ISO 4217) applied when a call omits one.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Total request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection timeout in seconds, distinct from the total timeout.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Whether to verify TLS certificates. Must stay enabled in live mode.
    #[serde(default = "default_true")]
    pub verify_tls: bool,

    /// Whether this client targets a live (production) integration.
    ///
    /// An explicit flag rather than environment detection.
    #[serde(default)]
    pub live_mode: bool,

    /// Secret used to verify inbound webhook signatures.
    #[serde(default)]
    pub webhook_secret: Option<String>,

    /// Request/response logging controls.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Response cache controls.
    #[serde(default)]
    pub cache: CacheConfig,
}

impl PaystackConfig {
    /// Creates a configuration with the given secret key and defaults for
    /// everything else.
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            base_url: default_base_url(),
            currency: default_currency(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            verify_tls: true,
            live_mode: false,
            webhook_secret: None,
            logging: LoggingConfig::default(),
            cache: CacheConfig::default(),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PaystackError::Config`] if the secret key or base URL is
    /// empty, or if TLS verification is disabled while `live_mode` is set.
    pub fn validate(&self) -> Result<()> {
        if self.secret_key.trim().is_empty() {
            return Err(PaystackError::Config("Paystack secret key is not set".to_owned()));
        }
        if self.base_url.trim().is_empty() {
            return Err(PaystackError::Config("Paystack base URL is not set".to_owned()));
        }
        if self.live_mode && !self.verify_tls {
            return Err(PaystackError::Config(
                "TLS verification must be enabled in live mode".to_owned(),
            ));
        }
        Ok(())
    }

    /// Returns the total request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the connection timeout as a [`Duration`].
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Request/response logging controls.
///
/// When enabled, the pipeline emits `tracing` events for each request and
/// response with sensitive keys redacted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// Whether request/response logging is enabled.
    #[serde(default)]
    pub enabled: bool,
}

/// Response cache controls.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Whether response caching is enabled at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Default time-to-live for cached responses, in seconds.
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,

    /// Namespace prefix applied to every cache key.
    #[serde(default = "default_cache_prefix")]
    pub prefix: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: default_cache_ttl_secs(),
            prefix: default_cache_prefix(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

fn default_currency() -> String {
    "NGN".to_owned()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

fn default_cache_ttl_secs() -> u64 {
    3600
}

fn default_cache_prefix() -> String {
    "paystack".to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_applies_defaults() {
        let config = PaystackConfig::new("sk_test_x");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.currency, "NGN");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
        assert!(config.verify_tls);
        assert!(!config.live_mode);
        assert!(config.cache.enabled);
        assert_eq!(config.cache.ttl_secs, 3600);
        assert_eq!(config.cache.prefix, "paystack");
        assert!(!config.logging.enabled);
    }

    #[test]
    fn from_toml_with_only_secret() {
        let config: PaystackConfig = toml::from_str("secret_key = \"sk_test_x\"").unwrap();
        assert_eq!(config.secret_key, "sk_test_x");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.verify_tls);
    }

    #[test]
    fn from_toml_full() {
        let toml = r#"
            secret_key = "sk_live_x"
            base_url = "https://api.paystack.co"
            currency = "GHS"
            timeout_secs = 60
            connect_timeout_secs = 5
            live_mode = true
            webhook_secret = "whsec_x"

            [logging]
            enabled = true

            [cache]
            enabled = false
            ttl_secs = 120
            prefix = "pay"
        "#;

        let config: PaystackConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.currency, "GHS");
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.connect_timeout_secs, 5);
        assert!(config.live_mode);
        assert_eq!(config.webhook_secret.as_deref(), Some("whsec_x"));
        assert!(config.logging.enabled);
        assert!(!config.cache.enabled);
        assert_eq!(config.cache.ttl_secs, 120);
        assert_eq!(config.cache.prefix, "pay");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_secret() {
        let config = PaystackConfig::new("  ");
        let err = config.validate().unwrap_err();
        assert!(matches!(err, PaystackError::Config(_)));
        assert!(err.to_string().contains("secret key"));
    }

    #[test]
    fn validate_rejects_empty_base_url() {
        let mut config = PaystackConfig::new("sk_test_x");
        config.base_url = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("base URL"));
    }

    #[test]
    fn validate_rejects_disabled_tls_in_live_mode() {
        let mut config = PaystackConfig::new("sk_live_x");
        config.live_mode = true;
        config.verify_tls = false;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("TLS"));
    }

    #[test]
    fn disabled_tls_allowed_outside_live_mode() {
        let mut config = PaystackConfig::new("sk_test_x");
        config.verify_tls = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_secret_key_fails_deserialization() {
        let result: std::result::Result<PaystackConfig, _> = toml::from_str("currency = \"NGN\"");
        assert!(result.is_err());
    }
}
