//! Flexible scalar coercers for numbers, booleans, strings and enums.
//!
//! Every function here is pure, total and side-effect-free: any JSON value
//! shape is accepted, and anything that cannot be converted collapses to
//! `None`. Missing, null and unparseable inputs are deliberately
//! indistinguishable at this level.

use num_bigint::BigInt;
use serde_json::Value;

/// A number that remembers whether it was an integer or a float.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Num {
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
}

impl Num {
    /// Convert to f64.
    #[inline]
    pub fn as_f64(&self) -> f64 {
        match self {
            Num::Int(i) => *i as f64,
            Num::Float(f) => *f,
        }
    }

    /// Convert to i64 (truncates floats toward zero).
    #[inline]
    pub fn as_i64(&self) -> i64 {
        match self {
            Num::Int(i) => *i,
            Num::Float(f) => *f as i64,
        }
    }

    /// Check if this is an integer.
    #[inline]
    pub fn is_int(&self) -> bool {
        matches!(self, Num::Int(_))
    }

    /// Check if this is a float.
    #[inline]
    pub fn is_float(&self) -> bool {
        matches!(self, Num::Float(_))
    }
}

impl From<i64> for Num {
    fn from(v: i64) -> Self {
        Num::Int(v)
    }
}

impl From<f64> for Num {
    fn from(v: f64) -> Self {
        Num::Float(v)
    }
}

/// Coerce a value to an integer.
///
/// Floats truncate toward zero; strings parse as base-10. The empty
/// string, null and every non-numeric shape are absent.
///
/// # Examples
///
/// ```
/// use pliant_json::coerce_i64;
/// use serde_json::json;
///
/// assert_eq!(coerce_i64(&json!(5)), Some(5));
/// assert_eq!(coerce_i64(&json!(5.9)), Some(5));
/// assert_eq!(coerce_i64(&json!("-12")), Some(-12));
/// assert_eq!(coerce_i64(&json!("")), None);
/// assert_eq!(coerce_i64(&json!([1])), None);
/// ```
pub fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i)
            } else {
                n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)
            }
        }
        Value::String(s) if !s.is_empty() => s.parse().ok(),
        _ => None,
    }
}

/// Coerce a value to a float.
///
/// Integers widen; strings parse as floating point.
pub fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if !s.is_empty() => s.parse().ok(),
        _ => None,
    }
}

/// Coerce a value to a number, preserving the integer/float distinction.
///
/// Strings try an integer parse first, then a float parse.
///
/// # Examples
///
/// ```
/// use pliant_json::{coerce_num, Num};
/// use serde_json::json;
///
/// assert_eq!(coerce_num(&json!("7")), Some(Num::Int(7)));
/// assert_eq!(coerce_num(&json!("7.5")), Some(Num::Float(7.5)));
/// ```
pub fn coerce_num(value: &Value) -> Option<Num> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Num::Int(i))
            } else {
                n.as_f64().map(Num::Float)
            }
        }
        Value::String(s) if !s.is_empty() => {
            if let Ok(i) = s.parse::<i64>() {
                Some(Num::Int(i))
            } else {
                s.parse::<f64>().ok().map(Num::Float)
            }
        }
        _ => None,
    }
}

/// Coerce a value to a boolean.
///
/// Accepts real booleans, the strings `"true"`/`"false"`/`"1"`/`"0"`
/// (case-insensitive), and the integers `1`/`0`. Everything else is
/// absent.
pub fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => {
            if s.eq_ignore_ascii_case("true") || s == "1" {
                Some(true)
            } else if s.eq_ignore_ascii_case("false") || s == "0" {
                Some(false)
            } else {
                None
            }
        }
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Coerce a value to a string.
///
/// The only coercer that never fails on non-null input: non-string
/// scalars and even containers get a textual rendering (compact JSON for
/// arrays and objects).
pub fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// Coerce a value against a named variant set.
///
/// A string matches a variant name case-insensitively; an integer is used
/// as an ordinal index into the set. On no match the caller-supplied
/// fallback (if any) is returned.
///
/// # Examples
///
/// ```
/// use pliant_json::coerce_enum;
/// use serde_json::json;
///
/// let levels = [("low", 0u8), ("high", 2u8)];
/// assert_eq!(coerce_enum(&json!("HIGH"), &levels, None), Some(2));
/// assert_eq!(coerce_enum(&json!(0), &levels, None), Some(0));
/// assert_eq!(coerce_enum(&json!("mid"), &levels, Some(9)), Some(9));
/// ```
pub fn coerce_enum<T: Clone>(value: &Value, variants: &[(&str, T)], fallback: Option<T>) -> Option<T> {
    let matched = match value {
        Value::String(s) => variants
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|(_, v)| v.clone()),
        Value::Number(n) => n
            .as_u64()
            .and_then(|i| usize::try_from(i).ok())
            .and_then(|i| variants.get(i))
            .map(|(_, v)| v.clone()),
        _ => None,
    };
    matched.or(fallback)
}

/// Coerce a value to an arbitrary-precision integer.
///
/// Integers widen losslessly; finite floats truncate toward zero;
/// non-empty numeric strings parse at arbitrary precision.
pub fn coerce_bigint(value: &Value) -> Option<BigInt> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(BigInt::from(i))
            } else if let Some(u) = n.as_u64() {
                Some(BigInt::from(u))
            } else {
                let f = n.as_f64()?;
                if !f.is_finite() || f.trunc().abs() >= i128::MAX as f64 {
                    return None;
                }
                Some(BigInt::from(f.trunc() as i128))
            }
        }
        Value::String(s) if !s.is_empty() => s.parse().ok(),
        _ => None,
    }
}

/// Like [`coerce_i64`], but absent collapses to `0`.
#[inline]
pub fn coerce_i64_required(value: &Value) -> i64 {
    coerce_i64(value).unwrap_or(0)
}

/// Like [`coerce_f64`], but absent collapses to `0.0`.
#[inline]
pub fn coerce_f64_required(value: &Value) -> f64 {
    coerce_f64(value).unwrap_or(0.0)
}

/// Like [`coerce_num`], but absent collapses to `Num::Int(0)`.
#[inline]
pub fn coerce_num_required(value: &Value) -> Num {
    coerce_num(value).unwrap_or(Num::Int(0))
}

/// Like [`coerce_bool`], but absent collapses to `false`.
#[inline]
pub fn coerce_bool_required(value: &Value) -> bool {
    coerce_bool(value).unwrap_or(false)
}

/// Like [`coerce_string`], but absent collapses to the empty string.
#[inline]
pub fn coerce_string_required(value: &Value) -> String {
    coerce_string(value).unwrap_or_default()
}

/// Like [`coerce_bigint`], but absent collapses to zero.
#[inline]
pub fn coerce_bigint_required(value: &Value) -> BigInt {
    coerce_bigint(value).unwrap_or_else(|| BigInt::from(0))
}
