//! Small helpers shared across integrations.
//!
//! Reference generation, display formatting of amounts, the supported
//! currency table with per-currency minimum charges, the known webhook
//! event types, and callback URL building.

use std::{
    collections::HashMap,
    time::{SystemTime, UNIX_EPOCH},
};

use url::Url;
use uuid::Uuid;

use crate::error::{PaystackError, Result};

/// A currency Paystack can charge in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrencyInfo {
    /// ISO 4217 code.
    pub code: &'static str,
    /// Display symbol.
    pub symbol: &'static str,
    /// Minimum chargeable amount in major units.
    pub minimum: f64,
}

/// Supported currencies with their display symbols and charge minimums.
pub const SUPPORTED_CURRENCIES: [CurrencyInfo; 6] = [
    CurrencyInfo { code: "NGN", symbol: "₦", minimum: 50.0 },
    CurrencyInfo { code: "USD", symbol: "$", minimum: 2.0 },
    CurrencyInfo { code: "GHS", symbol: "₵", minimum: 0.10 },
    CurrencyInfo { code: "ZAR", symbol: "R", minimum: 1.0 },
    CurrencyInfo { code: "KES", symbol: "Ksh", minimum: 3.0 },
    CurrencyInfo { code: "XOF", symbol: "CFA", minimum: 1.0 },
];

/// Event types Paystack currently delivers over webhooks.
pub const WEBHOOK_EVENT_TYPES: [&str; 18] = [
    "charge.success",
    "charge.dispute.create",
    "charge.dispute.remind",
    "charge.dispute.resolve",
    "customeridentification.failed",
    "customeridentification.success",
    "invoice.create",
    "invoice.payment_failed",
    "invoice.update",
    "refund.failed",
    "refund.pending",
    "refund.processed",
    "refund.processing",
    "subscription.create",
    "subscription.disable",
    "subscription.not_renew",
    "transfer.failed",
    "transfer.success",
];

/// Generates a unique payment reference of the form `PS_<unix>_<random>`.
#[must_use]
pub fn generate_reference() -> String {
    let unix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    format!("PS_{unix}_{}", Uuid::new_v4().simple())
}

/// Looks up the currency table entry for a code.
#[must_use]
pub fn currency_info(code: &str) -> Option<&'static CurrencyInfo> {
    SUPPORTED_CURRENCIES.iter().find(|info| info.code.eq_ignore_ascii_case(code))
}

/// Formats a major-unit amount for display, with the currency's symbol and
/// thousands separators.
///
/// Unknown currencies fall back to `CODE 1,234.56`.
#[must_use]
pub fn format_amount(amount: f64, currency: &str) -> String {
    let grouped = group_thousands(amount);
    match currency_info(currency) {
        Some(info) => format!("{}{grouped}", info.symbol),
        None => format!("{} {grouped}", currency.to_uppercase()),
    }
}

/// Checks an amount against the currency's minimum charge.
///
/// # Errors
///
/// Returns [`PaystackError::Validation`] for an unsupported currency, a
/// non-positive amount, or an amount below the currency minimum.
pub fn validate_amount(amount: f64, currency: &str) -> Result<()> {
    let Some(info) = currency_info(currency) else {
        return Err(amount_error(
            "currency",
            format!("currency '{currency}' is not supported"),
        ));
    };

    if !amount.is_finite() || amount <= 0.0 {
        return Err(amount_error("amount", "amount must be greater than zero".to_owned()));
    }

    if amount < info.minimum {
        return Err(amount_error(
            "amount",
            format!(
                "amount is below the {} minimum of {}",
                info.code,
                format_amount(info.minimum, info.code)
            ),
        ));
    }

    Ok(())
}

/// Builds a callback URL with the given query parameters appended.
///
/// # Errors
///
/// Returns [`PaystackError::Config`] if `base` is not a valid absolute URL.
pub fn build_callback_url(base: &str, params: &[(&str, &str)]) -> Result<String> {
    let mut url = Url::parse(base)
        .map_err(|e| PaystackError::Config(format!("invalid callback URL '{base}': {e}")))?;
    {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in params {
            pairs.append_pair(key, value);
        }
    }
    Ok(url.into())
}

fn amount_error(field: &str, message: String) -> PaystackError {
    let mut errors = HashMap::new();
    errors.insert(field.to_owned(), vec![message.clone()]);
    PaystackError::Validation { message, code: 0, errors, response: None }
}

/// Renders an amount with two decimals and comma-grouped thousands.
fn group_thousands(amount: f64) -> String {
    let rendered = format!("{:.2}", amount.abs());
    let (integer, fraction) = rendered.split_once('.').unwrap_or((rendered.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}
