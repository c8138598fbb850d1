//! Datetime and duration coercers.
//!
//! Datetimes normalize to UTC instants. Numeric inputs go through the
//! epoch-scale heuristic: values below 10,000,000,000 are read as seconds
//! since epoch, values at or above it as milliseconds. The threshold is a
//! heuristic, not a protocol guarantee: millisecond timestamps before
//! ~2001 and far-future second timestamps come out misclassified.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

use crate::scalar::coerce_f64;

/// Epoch values below this are seconds, at or above it milliseconds.
pub const EPOCH_MILLIS_THRESHOLD: i64 = 10_000_000_000;

const MILLIS_PER_SECOND: f64 = 1_000.0;
const MILLIS_PER_MINUTE: f64 = 60_000.0;
const MILLIS_PER_HOUR: f64 = 3_600_000.0;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Recognized duration unit keys, long and short forms combined.
const DURATION_UNIT_KEYS: &[(&str, f64)] = &[
    ("days", MILLIS_PER_DAY),
    ("d", MILLIS_PER_DAY),
    ("hours", MILLIS_PER_HOUR),
    ("h", MILLIS_PER_HOUR),
    ("minutes", MILLIS_PER_MINUTE),
    ("m", MILLIS_PER_MINUTE),
    ("seconds", MILLIS_PER_SECOND),
    ("s", MILLIS_PER_SECOND),
    ("milliseconds", 1.0),
    ("ms", 1.0),
];

/// Coerce a value to a UTC instant.
///
/// Numbers run through the epoch-scale heuristic. Strings try a strict
/// ISO-8601 parse first; purely numeric strings then fall back to the
/// same heuristic.
///
/// # Examples
///
/// ```
/// use pliant_json::coerce_datetime;
/// use chrono::Datelike;
/// use serde_json::json;
///
/// let dt = coerce_datetime(&json!("2021-03-04T05:06:07Z")).unwrap();
/// assert_eq!(dt.year(), 2021);
///
/// // 10_000_000_000 is at the threshold: read as milliseconds, i.e. 1970.
/// let dt = coerce_datetime(&json!(10_000_000_000i64)).unwrap();
/// assert_eq!(dt.year(), 1970);
/// ```
pub fn coerce_datetime(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => {
            let raw = n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))?;
            datetime_from_epoch(raw)
        }
        Value::String(s) if !s.is_empty() => {
            if let Some(dt) = parse_iso_datetime(s) {
                return Some(dt);
            }
            if is_numeric_text(s) {
                return s.parse().ok().and_then(datetime_from_epoch);
            }
            None
        }
        _ => None,
    }
}

/// Apply the epoch-scale heuristic and convert to a UTC instant.
fn datetime_from_epoch(raw: i64) -> Option<DateTime<Utc>> {
    let millis = if raw < EPOCH_MILLIS_THRESHOLD {
        raw.checked_mul(1000)?
    } else {
        raw
    };
    Utc.timestamp_millis_opt(millis).single()
}

/// Strict ISO-8601 parse, with or without an offset; date-only accepted.
fn parse_iso_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }
    None
}

fn is_numeric_text(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Coerce a value to a duration.
///
/// Integers are millisecond counts. Objects sum recognized unit keys
/// (`hours` and `h` both work, unknown keys are ignored). Strings try the
/// ISO-8601 duration grammar, then human-readable `<number><unit>` tokens
/// (`d`, `h`, `m`, `s`, `ms`; the longer unit token wins over a prefix
/// match), then a bare millisecond count.
///
/// # Examples
///
/// ```
/// use pliant_json::coerce_duration;
/// use chrono::Duration;
/// use serde_json::json;
///
/// assert_eq!(coerce_duration(&json!("PT1H30M")), Some(Duration::minutes(90)));
/// assert_eq!(coerce_duration(&json!("1h 30m")), Some(Duration::minutes(90)));
/// assert_eq!(coerce_duration(&json!(5000)), Some(Duration::milliseconds(5000)));
/// assert_eq!(coerce_duration(&json!({"h": 1, "minutes": 30})), Some(Duration::minutes(90)));
/// ```
pub fn coerce_duration(value: &Value) -> Option<Duration> {
    match value {
        Value::Number(n) => {
            let millis = n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))?;
            Some(Duration::milliseconds(millis))
        }
        Value::Object(map) => {
            let mut millis = 0.0;
            for (key, factor) in DURATION_UNIT_KEYS {
                if let Some(amount) = map.get(*key).and_then(coerce_f64) {
                    millis += amount * factor;
                }
            }
            Some(Duration::milliseconds(millis.round() as i64))
        }
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            parse_iso_duration(trimmed)
                .or_else(|| parse_human_duration(trimmed))
                .or_else(|| trimmed.parse().ok().map(Duration::milliseconds))
        }
        _ => None,
    }
}

/// Parse the `P[n]D[T[n]H[n]M[n(.f)]S]` grammar, case-insensitive.
fn parse_iso_duration(s: &str) -> Option<Duration> {
    let upper = s.to_ascii_uppercase();
    let body = upper.strip_prefix('P')?;
    let (date_part, time_part) = match body.split_once('T') {
        Some((d, t)) => (d, t),
        None => (body, ""),
    };

    let mut millis = 0.0;
    let mut matched = false;

    if !date_part.is_empty() {
        let (days, rest) = split_number(date_part)?;
        let rest = rest.strip_prefix('D')?;
        if !rest.is_empty() {
            return None;
        }
        millis += days * MILLIS_PER_DAY;
        matched = true;
    }

    let mut rest = time_part;
    for (unit, factor) in [
        ('H', MILLIS_PER_HOUR),
        ('M', MILLIS_PER_MINUTE),
        ('S', MILLIS_PER_SECOND),
    ] {
        if rest.is_empty() {
            break;
        }
        let (amount, tail) = split_number(rest)?;
        if let Some(tail) = tail.strip_prefix(unit) {
            millis += amount * factor;
            matched = true;
            rest = tail;
        }
    }

    if !rest.is_empty() || !matched {
        return None;
    }
    Some(Duration::milliseconds(millis.round() as i64))
}

/// Parse repeated `<number><unit>` tokens, whitespace-tolerant.
fn parse_human_duration(s: &str) -> Option<Duration> {
    let mut millis = 0.0;
    let mut matched = false;
    let mut rest = s.trim_start();

    while !rest.is_empty() {
        let (amount, tail) = split_number(rest)?;
        let unit_len = tail
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(tail.len());
        let factor = match tail[..unit_len].to_ascii_lowercase().as_str() {
            "ms" => 1.0,
            "s" => MILLIS_PER_SECOND,
            "m" => MILLIS_PER_MINUTE,
            "h" => MILLIS_PER_HOUR,
            "d" => MILLIS_PER_DAY,
            _ => return None,
        };
        millis += amount * factor;
        matched = true;
        rest = tail[unit_len..].trim_start();
    }

    if !matched {
        return None;
    }
    Some(Duration::milliseconds(millis.round() as i64))
}

/// Read a decimal number off the front of a string.
fn split_number(s: &str) -> Option<(f64, &str)> {
    let end = s
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    let number = s[..end].parse().ok()?;
    Some((number, &s[end..]))
}

/// Like [`coerce_datetime`], but absent collapses to the Unix epoch.
#[inline]
pub fn coerce_datetime_required(value: &Value) -> DateTime<Utc> {
    coerce_datetime(value).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Like [`coerce_duration`], but absent collapses to the zero duration.
#[inline]
pub fn coerce_duration_required(value: &Value) -> Duration {
    coerce_duration(value).unwrap_or_else(Duration::zero)
}
