//! Structural operations over JSON objects: merge, diff, flatten,
//! query-string rendering.
//!
//! All functions here are pure `&Value -> Value` style transforms; the
//! [`Document`](crate::Document) wrapper exposes them as methods.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Form-style query encoding: everything but unreserved characters.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Shallow merge: keys from `right` overwrite keys in `left`.
pub fn merge(left: &Map<String, Value>, right: &Map<String, Value>) -> Map<String, Value> {
    let mut out = left.clone();
    for (k, v) in right {
        out.insert(k.clone(), v.clone());
    }
    out
}

/// Deep merge: recurse only where both sides hold objects at a key,
/// otherwise the right-hand value wins.
///
/// # Examples
///
/// ```
/// use pliant_json::deep_merge;
/// use serde_json::json;
///
/// let left = json!({"a": 1, "nested": {"b": 2, "c": 3}});
/// let right = json!({"nested": {"c": 30, "d": 4}});
/// let merged = deep_merge(&left, &right);
/// assert_eq!(merged, json!({"a": 1, "nested": {"b": 2, "c": 30, "d": 4}}));
/// ```
pub fn deep_merge(left: &Value, right: &Value) -> Value {
    match (left, right) {
        (Value::Object(l), Value::Object(r)) => {
            let mut out = l.clone();
            for (k, rv) in r {
                let merged = match out.get(k) {
                    Some(lv) => deep_merge(lv, rv),
                    None => rv.clone(),
                };
                out.insert(k.clone(), merged);
            }
            Value::Object(out)
        }
        (_, replacement) => replacement.clone(),
    }
}

/// The change at one key between two objects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueChange {
    /// The value on the left-hand side.
    pub from: Value,
    /// The value on the right-hand side.
    pub to: Value,
}

/// Added/removed/changed keys between two objects.
///
/// Equality is by value, not reference; key order is irrelevant.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentDiff {
    /// Keys present only in the right-hand object.
    pub added: Map<String, Value>,
    /// Keys present only in the left-hand object.
    pub removed: Map<String, Value>,
    /// Keys present in both with unequal values.
    pub changed: BTreeMap<String, ValueChange>,
}

impl DocumentDiff {
    /// True when the two objects were deeply equal.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

/// Compute the diff from `left` to `right`.
pub fn diff(left: &Map<String, Value>, right: &Map<String, Value>) -> DocumentDiff {
    let mut out = DocumentDiff::default();

    for (k, rv) in right {
        match left.get(k) {
            None => {
                out.added.insert(k.clone(), rv.clone());
            }
            Some(lv) if lv != rv => {
                out.changed.insert(
                    k.clone(),
                    ValueChange {
                        from: lv.clone(),
                        to: rv.clone(),
                    },
                );
            }
            Some(_) => {}
        }
    }
    for (k, lv) in left {
        if !right.contains_key(k) {
            out.removed.insert(k.clone(), lv.clone());
        }
    }

    out
}

/// Flatten nested objects and arrays into dot-path leaf entries.
///
/// Objects contribute `prefix.key` paths, arrays `prefix.index` paths.
/// Empty containers disappear (they have no leaves).
///
/// # Examples
///
/// ```
/// use pliant_json::flatten;
/// use serde_json::json;
///
/// let flat = flatten(json!({"a": {"b": 1}, "items": [10, 20]}).as_object().unwrap());
/// assert_eq!(flat["a.b"], json!(1));
/// assert_eq!(flat["items.0"], json!(10));
/// assert_eq!(flat["items.1"], json!(20));
/// ```
pub fn flatten(map: &Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::new();
    for (k, v) in map {
        flatten_into(k.clone(), v, &mut out);
    }
    out
}

fn flatten_into(prefix: String, value: &Value, out: &mut Map<String, Value>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (k, v) in map {
                flatten_into(format!("{prefix}.{k}"), v, out);
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for (i, v) in items.iter().enumerate() {
                flatten_into(format!("{prefix}.{i}"), v, out);
            }
        }
        leaf => {
            out.insert(prefix, leaf.clone());
        }
    }
}

/// Rebuild a nested object from dot-path keys; the inverse of
/// [`flatten`].
///
/// A numeric segment creates an array slot (padding shorter arrays with
/// null); colliding paths resolve last-writer-wins.
pub fn unflatten(flat: &Map<String, Value>) -> Map<String, Value> {
    let mut root = Value::Object(Map::new());
    for (path, value) in flat {
        let segments: Vec<&str> = path.split('.').collect();
        insert_at(&mut root, &segments, value.clone());
    }
    match root {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn insert_at(current: &mut Value, segments: &[&str], value: Value) {
    let (seg, rest) = match segments.split_first() {
        Some(pair) => pair,
        None => {
            *current = value;
            return;
        }
    };

    // The segment's own syntax picks the slot; the next segment picks the
    // child container shape.
    match seg.parse::<usize>() {
        Ok(index) => {
            if !current.is_array() {
                *current = Value::Array(Vec::new());
            }
            if let Some(items) = current.as_array_mut() {
                while items.len() <= index {
                    items.push(Value::Null);
                }
                insert_at(&mut items[index], rest, value);
            }
        }
        Err(_) => {
            if !current.is_object() {
                *current = Value::Object(Map::new());
            }
            if let Some(map) = current.as_object_mut() {
                let child = map.entry(seg.to_string()).or_insert(Value::Null);
                insert_at(child, rest, value);
            }
        }
    }
}

/// Keep only the named keys.
pub fn pick(map: &Map<String, Value>, keys: &[&str]) -> Map<String, Value> {
    keys.iter()
        .filter_map(|k| map.get(*k).map(|v| ((*k).to_owned(), v.clone())))
        .collect()
}

/// Rebuild the object by passing every key/value pair through `f`.
pub fn map_values(
    map: &Map<String, Value>,
    f: impl Fn(&str, &Value) -> Value,
) -> Map<String, Value> {
    map.iter().map(|(k, v)| (k.clone(), f(k, v))).collect()
}

/// Render an object as an HTTP query string.
///
/// Nested objects use `parent[child]` bracket notation, arrays
/// `parent[index]`. Values are percent-encoded unless `encode` is false.
///
/// # Examples
///
/// ```
/// use pliant_json::to_query_string;
/// use serde_json::json;
///
/// let map = json!({"q": "a b", "page": 2}).as_object().unwrap().clone();
/// assert_eq!(to_query_string(&map, true), "page=2&q=a%20b");
/// ```
pub fn to_query_string(map: &Map<String, Value>, encode: bool) -> String {
    let mut pairs = Vec::new();
    for (k, v) in map {
        query_pairs(k.clone(), v, encode, &mut pairs);
    }
    pairs.join("&")
}

fn query_pairs(key: String, value: &Value, encode: bool, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                query_pairs(format!("{key}[{k}]"), v, encode, out);
            }
        }
        Value::Array(items) => {
            for (i, v) in items.iter().enumerate() {
                query_pairs(format!("{key}[{i}]"), v, encode, out);
            }
        }
        leaf => {
            let text = match leaf {
                Value::Null => String::new(),
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            let rendered = if encode {
                utf8_percent_encode(&text, QUERY_ENCODE_SET).to_string()
            } else {
                text
            };
            out.push(format!("{key}={rendered}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_shallow_merge_right_wins() {
        let merged = merge(&obj(json!({"a": 1, "b": 2})), &obj(json!({"b": 20, "c": 3})));
        assert_eq!(Value::Object(merged), json!({"a": 1, "b": 20, "c": 3}));
    }

    #[test]
    fn test_deep_merge_recurses_on_objects_only() {
        let merged = deep_merge(
            &json!({"a": 1, "nested": {"b": 2, "c": 3}}),
            &json!({"nested": {"c": 30, "d": 4}}),
        );
        assert_eq!(merged, json!({"a": 1, "nested": {"b": 2, "c": 30, "d": 4}}));

        // Non-object on either side: right wins wholesale.
        let replaced = deep_merge(&json!({"x": {"y": 1}}), &json!({"x": [1, 2]}));
        assert_eq!(replaced, json!({"x": [1, 2]}));
    }

    #[test]
    fn test_diff() {
        let d = diff(
            &obj(json!({"a": 1, "b": 2, "c": 3})),
            &obj(json!({"a": 1, "b": 20, "d": 4})),
        );
        assert_eq!(Value::Object(d.added.clone()), json!({"d": 4}));
        assert_eq!(Value::Object(d.removed.clone()), json!({"c": 3}));
        assert_eq!(d.changed.len(), 1);
        assert_eq!(d.changed["b"].from, json!(2));
        assert_eq!(d.changed["b"].to, json!(20));
    }

    #[test]
    fn test_diff_equal_is_empty() {
        // Value equality, not reference equality; key order irrelevant.
        let d = diff(
            &obj(json!({"a": 1, "b": {"x": 1}})),
            &obj(json!({"b": {"x": 1}, "a": 1})),
        );
        assert!(d.is_empty());
    }

    #[test]
    fn test_flatten() {
        let flat = flatten(&obj(json!({"a": {"b": 1, "c": {"d": 2}}, "items": [10, 20]})));
        assert_eq!(flat["a.b"], json!(1));
        assert_eq!(flat["a.c.d"], json!(2));
        assert_eq!(flat["items.0"], json!(10));
        assert_eq!(flat["items.1"], json!(20));
    }

    #[test]
    fn test_unflatten_round_trip() {
        let original = obj(json!({
            "a": {"b": 1, "c": {"d": 2}},
            "items": [10, 20],
            "leaf": "x"
        }));
        let rebuilt = unflatten(&flatten(&original));
        assert_eq!(Value::Object(rebuilt), Value::Object(original));
    }

    #[test]
    fn test_unflatten_pads_arrays() {
        let mut flat = Map::new();
        flat.insert("items.2".to_owned(), json!("third"));
        let rebuilt = unflatten(&flat);
        assert_eq!(Value::Object(rebuilt), json!({"items": [null, null, "third"]}));
    }

    #[test]
    fn test_flatten_drops_empty_containers() {
        // Empty objects and arrays have no leaves, so they do not
        // survive a flatten/unflatten round trip.
        let flat = flatten(&obj(json!({"a": {}, "b": [], "c": 1})));
        assert_eq!(Value::Object(flat.clone()), json!({"c": 1}));
        assert_eq!(Value::Object(unflatten(&flat)), json!({"c": 1}));
    }

    #[test]
    fn test_pick() {
        let picked = pick(&obj(json!({"a": 1, "b": 2, "c": 3})), &["a", "c", "zz"]);
        assert_eq!(Value::Object(picked), json!({"a": 1, "c": 3}));
    }

    #[test]
    fn test_map_values() {
        let doubled = map_values(&obj(json!({"a": 1, "b": 2})), |_, v| {
            json!(v.as_i64().unwrap_or(0) * 2)
        });
        assert_eq!(Value::Object(doubled), json!({"a": 2, "b": 4}));
    }

    #[test]
    fn test_query_string_nested_and_encoded() {
        let map = obj(json!({"q": "a b", "filter": {"min": 1}, "tags": ["x", "y"]}));
        // Only values are encoded; bracket notation in keys stays readable.
        assert_eq!(
            to_query_string(&map, true),
            "filter[min]=1&q=a%20b&tags[0]=x&tags[1]=y"
        );
    }

    #[test]
    fn test_query_string_unencoded() {
        let map = obj(json!({"q": "a b", "tags": ["x"]}));
        // Map iteration is key-ordered, so output is deterministic.
        assert_eq!(to_query_string(&map, false), "q=a b&tags[0]=x");
    }
}
