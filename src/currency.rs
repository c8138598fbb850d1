//! Locale-free currency parsing.
//!
//! Accepts bare numbers, `{amount, currency}` objects, and strings with a
//! leading currency symbol or trailing 3-letter code. Thousands-separator
//! commas and spaces are stripped; no locale tables are consulted (a
//! stated non-goal).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::scalar::{coerce_f64, coerce_string};

/// Known currency symbols and their ISO 4217 (or conventional) codes.
///
/// A fixed table initialized once; never mutated at runtime.
pub const CURRENCY_SYMBOLS: &[(&str, &str)] = &[
    ("$", "USD"),
    ("€", "EUR"),
    ("£", "GBP"),
    ("¥", "JPY"),
    ("₹", "INR"),
    ("₽", "RUB"),
    ("₿", "BTC"),
];

/// A monetary amount with an optional currency code.
///
/// Immutable and structurally comparable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurrencyValue {
    /// The numeric amount.
    pub amount: f64,
    /// Three-letter currency code, when one was detected or supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl CurrencyValue {
    /// Create a currency value.
    #[inline]
    pub fn new(amount: f64, code: Option<String>) -> Self {
        Self { amount, code }
    }

    /// Create a code-less amount.
    #[inline]
    pub fn bare(amount: f64) -> Self {
        Self { amount, code: None }
    }

    /// Create an amount with a code.
    #[inline]
    pub fn with_code(amount: f64, code: impl Into<String>) -> Self {
        Self {
            amount,
            code: Some(code.into()),
        }
    }
}

/// Coerce a value to a currency amount.
///
/// Numbers become code-less amounts. Objects are read through the
/// `amount`/`value` and `currency`/`currencyCode` key pairs. Strings are
/// scanned for a known leading symbol (checked first) and a trailing
/// three-uppercase-letter code, then parsed with commas and spaces
/// stripped.
///
/// # Examples
///
/// ```
/// use pliant_json::{coerce_currency, CurrencyValue};
/// use serde_json::json;
///
/// assert_eq!(
///     coerce_currency(&json!("$1,234.56")),
///     Some(CurrencyValue::with_code(1234.56, "USD"))
/// );
/// assert_eq!(
///     coerce_currency(&json!({"amount": 50.0, "currency": "GBP"})),
///     Some(CurrencyValue::with_code(50.0, "GBP"))
/// );
/// ```
pub fn coerce_currency(value: &Value) -> Option<CurrencyValue> {
    match value {
        Value::Number(n) => n.as_f64().map(CurrencyValue::bare),
        Value::Object(map) => {
            let amount = map
                .get("amount")
                .or_else(|| map.get("value"))
                .and_then(coerce_f64)?;
            let code = map
                .get("currency")
                .or_else(|| map.get("currencyCode"))
                .and_then(coerce_string);
            Some(CurrencyValue::new(amount, code))
        }
        Value::String(s) => parse_currency_text(s),
        _ => None,
    }
}

fn parse_currency_text(s: &str) -> Option<CurrencyValue> {
    let mut rest = s.trim();
    if rest.is_empty() {
        return None;
    }

    // Leading symbol takes positional precedence.
    let mut code: Option<&str> = None;
    for (symbol, symbol_code) in CURRENCY_SYMBOLS {
        if let Some(tail) = rest.strip_prefix(symbol) {
            code = Some(symbol_code);
            rest = tail.trim_start();
            break;
        }
    }

    // A trailing 3-uppercase-letter code still applies to the remainder;
    // the symbol's code wins if both are present.
    if rest.len() > 3 && rest.is_char_boundary(rest.len() - 3) {
        let (head, tail) = rest.split_at(rest.len() - 3);
        if tail.bytes().all(|b| b.is_ascii_uppercase()) {
            if code.is_none() {
                code = CURRENCY_SYMBOLS
                    .iter()
                    .find(|(_, c)| *c == tail)
                    .map(|(_, c)| *c);
                // Unknown codes are kept verbatim.
                if code.is_none() {
                    return parse_amount(head).map(|amount| CurrencyValue::with_code(amount, tail));
                }
            }
            rest = head.trim_end();
        }
    }

    parse_amount(rest).map(|amount| CurrencyValue::new(amount, code.map(str::to_owned)))
}

fn parse_amount(s: &str) -> Option<f64> {
    let cleaned: String = s.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

/// Like [`coerce_currency`], but absent collapses to a zero amount.
#[inline]
pub fn coerce_currency_required(value: &Value) -> CurrencyValue {
    coerce_currency(value).unwrap_or_else(|| CurrencyValue::bare(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_symbol_prefix() {
        assert_eq!(
            coerce_currency(&json!("$1,234.56")),
            Some(CurrencyValue::with_code(1234.56, "USD"))
        );
        assert_eq!(
            coerce_currency(&json!("€99.99")),
            Some(CurrencyValue::with_code(99.99, "EUR"))
        );
        assert_eq!(
            coerce_currency(&json!("₿0.5")),
            Some(CurrencyValue::with_code(0.5, "BTC"))
        );
    }

    #[test]
    fn test_trailing_code() {
        assert_eq!(
            coerce_currency(&json!("1234.56 GBP")),
            Some(CurrencyValue::with_code(1234.56, "GBP"))
        );
        // Unknown trailing codes are kept verbatim.
        assert_eq!(
            coerce_currency(&json!("10 XYZ")),
            Some(CurrencyValue::with_code(10.0, "XYZ"))
        );
    }

    #[test]
    fn test_symbol_wins_over_trailing_code() {
        assert_eq!(
            coerce_currency(&json!("$100 EUR")),
            Some(CurrencyValue::with_code(100.0, "USD"))
        );
    }

    #[test]
    fn test_bare_number() {
        assert_eq!(coerce_currency(&json!(42.5)), Some(CurrencyValue::bare(42.5)));
        assert_eq!(coerce_currency(&json!(7)), Some(CurrencyValue::bare(7.0)));
        assert_eq!(coerce_currency(&json!("19.99")), Some(CurrencyValue::bare(19.99)));
    }

    #[test]
    fn test_object_form() {
        assert_eq!(
            coerce_currency(&json!({"amount": 50.0, "currency": "GBP"})),
            Some(CurrencyValue::with_code(50.0, "GBP"))
        );
        assert_eq!(
            coerce_currency(&json!({"value": "25.5", "currencyCode": "EUR"})),
            Some(CurrencyValue::with_code(25.5, "EUR"))
        );
        // Amount missing: absent, even with a code present.
        assert_eq!(coerce_currency(&json!({"currency": "USD"})), None);
    }

    #[test]
    fn test_garbage_absent() {
        assert_eq!(coerce_currency(&json!(null)), None);
        assert_eq!(coerce_currency(&json!("")), None);
        assert_eq!(coerce_currency(&json!("$")), None);
        assert_eq!(coerce_currency(&json!("free")), None);
        assert_eq!(coerce_currency(&json!(true)), None);
    }

    #[test]
    fn test_required_zero() {
        assert_eq!(coerce_currency_required(&json!(null)), CurrencyValue::bare(0.0));
    }
}
