//! Collection coercers: single-or-list normalization and map filtering.
//!
//! Upstream APIs sometimes return a bare item where a one-element array
//! was expected, and arrays with a few malformed entries. Both are
//! normalized here: scalars promote to singletons, unparseable elements
//! are dropped rather than poisoning the whole list.

use serde_json::Value;
use std::collections::BTreeMap;

/// Coerce a value into a list by running each element through `item`.
///
/// - null is absent;
/// - an array maps every element, *dropping* the ones that fail (a list
///   with some bad entries still yields a usable shorter list);
/// - any other shape is treated as a single bare item: success yields a
///   singleton, failure is absent (not an empty list).
///
/// # Examples
///
/// ```
/// use pliant_json::{coerce_list, coerce_i64};
/// use serde_json::json;
///
/// assert_eq!(coerce_list(&json!([1, "a", 3]), coerce_i64), Some(vec![1, 3]));
/// assert_eq!(coerce_list(&json!("7"), coerce_i64), Some(vec![7]));
/// assert_eq!(coerce_list(&json!("x"), coerce_i64), None);
/// assert_eq!(coerce_list(&json!(null), coerce_i64), None);
/// ```
pub fn coerce_list<T>(value: &Value, item: impl Fn(&Value) -> Option<T>) -> Option<Vec<T>> {
    match value {
        Value::Null => None,
        Value::Array(items) => Some(items.iter().filter_map(item).collect()),
        single => item(single).map(|v| vec![v]),
    }
}

/// Like [`coerce_list`], but absence collapses to an empty list.
///
/// Guarantees a usable (possibly empty) sequence for consumers that
/// cannot handle absence.
pub fn coerce_list_required<T>(value: &Value, item: impl Fn(&Value) -> Option<T>) -> Vec<T> {
    coerce_list(value, item).unwrap_or_default()
}

/// Coerce an object's entries through a combined transform/filter.
///
/// `entry` may emit a transformed key/value pair or drop the entry by
/// returning `None`. Null and non-object input are absent.
///
/// # Examples
///
/// ```
/// use pliant_json::{coerce_map, coerce_i64};
/// use serde_json::json;
///
/// let parsed = coerce_map(&json!({"a": "1", "b": "x", "c": "3"}), |k, v| {
///     coerce_i64(v).map(|n| (k.to_owned(), n))
/// })
/// .unwrap();
/// assert_eq!(parsed.get("a"), Some(&1));
/// assert_eq!(parsed.get("b"), None);
/// assert_eq!(parsed.get("c"), Some(&3));
/// ```
pub fn coerce_map<T>(
    value: &Value,
    entry: impl Fn(&str, &Value) -> Option<(String, T)>,
) -> Option<BTreeMap<String, T>> {
    match value {
        Value::Object(map) => Some(map.iter().filter_map(|(k, v)| entry(k, v)).collect()),
        _ => None,
    }
}

/// Like [`coerce_map`], but absence collapses to an empty map.
pub fn coerce_map_required<T>(
    value: &Value,
    entry: impl Fn(&str, &Value) -> Option<(String, T)>,
) -> BTreeMap<String, T> {
    coerce_map(value, entry).unwrap_or_default()
}
