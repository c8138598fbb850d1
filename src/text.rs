//! Text-shaping coercers: phone numbers, slugs, URIs, card numbers.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde_json::Value;
use url::Url;

use crate::scalar::coerce_string;

/// Characters percent-encoded by the lenient URI fallback: controls,
/// space, and the RFC 3986 characters browsers encode in practice.
const URI_FALLBACK_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^');

/// Coerce a value to a bare-digits phone number.
///
/// Every non-digit character is stripped, except that a single leading
/// `+` survives when the trimmed input began with one. Absent only when
/// no digits remain.
///
/// # Examples
///
/// ```
/// use pliant_json::coerce_phone;
/// use serde_json::json;
///
/// assert_eq!(coerce_phone(&json!("(555) 123-4567")), Some("5551234567".into()));
/// assert_eq!(coerce_phone(&json!("+1 555 123 4567")), Some("+15551234567".into()));
/// assert_eq!(coerce_phone(&json!("ext.")), None);
/// ```
pub fn coerce_phone(value: &Value) -> Option<String> {
    let text = coerce_string(value)?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut out = String::with_capacity(trimmed.len());
    if trimmed.starts_with('+') {
        out.push('+');
    }
    out.extend(trimmed.chars().filter(char::is_ascii_digit));

    if out.trim_start_matches('+').is_empty() {
        return None;
    }
    Some(out)
}

/// Coerce a value to a URL-safe slug.
///
/// Lowercases, strips everything but word characters, whitespace and
/// hyphens, collapses whitespace/underscore runs into single hyphens,
/// and trims leading/trailing hyphens.
///
/// # Examples
///
/// ```
/// use pliant_json::coerce_slug;
/// use serde_json::json;
///
/// assert_eq!(coerce_slug(&json!("Hello World! 123")), Some("hello-world-123".into()));
/// ```
pub fn coerce_slug(value: &Value) -> Option<String> {
    let text = coerce_string(value)?;
    if text.trim().is_empty() {
        return None;
    }

    let mut out = String::with_capacity(text.len());
    let mut pending_hyphen = false;
    for c in text.to_lowercase().chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(c);
        } else if c.is_whitespace() || c == '_' || c == '-' {
            pending_hyphen = true;
        }
        // Anything else is stripped without breaking the current run.
    }

    if out.is_empty() {
        return None;
    }
    Some(out)
}

/// Coerce a value to a URI string, leniently.
///
/// A string that parses as an absolute URL is returned in normalized
/// form. Anything else is *not* rejected: invalid characters are
/// percent-encoded and the result returned best-effort (spaces become
/// `%20`). Callers wanting strict validation should parse the result
/// themselves.
pub fn coerce_uri(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s,
        _ => return None,
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(url) = Url::parse(trimmed) {
        return Some(url.to_string());
    }
    Some(utf8_percent_encode(trimmed, URI_FALLBACK_SET).to_string())
}

/// Check a digit string against the Luhn checksum.
///
/// Non-digit input or fewer than two digits fails.
pub fn luhn_valid(digits: &str) -> bool {
    if digits.len() < 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let mut sum = 0u32;
    for (i, b) in digits.bytes().rev().enumerate() {
        let mut d = (b - b'0') as u32;
        if i % 2 == 1 {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }
        sum += d;
    }
    sum % 10 == 0
}

/// Coerce a value to a Luhn-valid card number.
///
/// Spaces and hyphens are stripped; the remainder must be all digits of
/// plausible card length and pass the Luhn check.
pub fn coerce_card_number(value: &Value) -> Option<String> {
    let text = coerce_string(value)?;
    let digits: String = text.chars().filter(|c| !c.is_whitespace() && *c != '-').collect();

    if digits.len() < 12 || digits.len() > 19 || !luhn_valid(&digits) {
        return None;
    }
    Some(digits)
}

/// Like [`coerce_phone`], but absent collapses to the empty string.
#[inline]
pub fn coerce_phone_required(value: &Value) -> String {
    coerce_phone(value).unwrap_or_default()
}

/// Like [`coerce_slug`], but absent collapses to the empty string.
#[inline]
pub fn coerce_slug_required(value: &Value) -> String {
    coerce_slug(value).unwrap_or_default()
}

/// Like [`coerce_uri`], but absent collapses to the empty string.
#[inline]
pub fn coerce_uri_required(value: &Value) -> String {
    coerce_uri(value).unwrap_or_default()
}
