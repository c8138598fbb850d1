//! The document wrapper: a JSON object with typed, path-aware access and
//! a private diagnostic log.
//!
//! A `Document` owns one JSON object. Getters compose the path resolver
//! with the scalar and collection coercers; every failure surfaces as
//! `None`, with path and construction failures additionally recorded in
//! the instance's log. Callers who never read the log observe only
//! silent absence.
//!
//! The log lives in a `RefCell`, which makes `Document` intentionally
//! not `Sync`: an instance belongs to one thread, and sharing one across
//! threads must be serialized by the caller.

use chrono::{DateTime, Duration, Utc};
use num_bigint::BigInt;
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::BTreeMap;
use tracing::debug;

use crate::collection::coerce_list;
use crate::currency::{coerce_currency, CurrencyValue};
use crate::error::{value_type_name, Diagnostic};
use crate::path::resolve_in;
use crate::scalar::{
    coerce_bigint, coerce_bool, coerce_f64, coerce_i64, coerce_num, coerce_string, Num,
};
use crate::temporal::{coerce_datetime, coerce_duration};
use crate::text::{coerce_phone, coerce_slug, coerce_uri};
use crate::transform::{
    deep_merge, diff, flatten, map_values, merge, pick, to_query_string, unflatten, DocumentDiff,
};

/// A JSON object wrapped with typed getters, path navigation and a
/// diagnostic log.
///
/// # Examples
///
/// ```
/// use pliant_json::Document;
/// use serde_json::json;
///
/// let doc = Document::from_response(&json!({
///     "id": "42",
///     "active": "1",
///     "stock": {"count": "7"}
/// }));
///
/// assert_eq!(doc.get_i64("id"), Some(42));
/// assert_eq!(doc.get_bool("active"), Some(true));
/// assert_eq!(doc.get_i64_path("stock.count"), Some(7));
/// assert_eq!(doc.get_i64("missing"), None);
/// ```
#[derive(Debug, Default)]
pub struct Document {
    map: Map<String, Value>,
    log: RefCell<Vec<Diagnostic>>,
}

impl Clone for Document {
    fn clone(&self) -> Self {
        Self {
            map: self.map.clone(),
            log: RefCell::new(self.log.borrow().clone()),
        }
    }
}

/// Identity is structural: two documents are equal iff their underlying
/// objects are deeply equal. The diagnostic log does not participate.
impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl From<Map<String, Value>> for Document {
    fn from(map: Map<String, Value>) -> Self {
        Self::new(map)
    }
}

impl Document {
    /// Wrap an existing JSON object.
    #[inline]
    pub fn new(map: Map<String, Value>) -> Self {
        Self {
            map,
            log: RefCell::new(Vec::new()),
        }
    }

    /// Create an empty document.
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse JSON text into a document.
    ///
    /// Parse failures and non-object payloads degrade to an empty
    /// document with the failure recorded in the log; nothing is thrown.
    pub fn from_json(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => Self::new(map),
            Ok(other) => {
                debug!(found = value_type_name(&other), "JSON text was not an object");
                let doc = Self::empty();
                doc.record(Diagnostic::construction(format!(
                    "expected a JSON object, got {}",
                    value_type_name(&other)
                )));
                doc
            }
            Err(err) => {
                debug!(error = %err, "failed to parse JSON text");
                let doc = Self::empty();
                doc.record(Diagnostic::construction(format!("invalid JSON: {err}")));
                doc
            }
        }
    }

    /// Build a document from a polymorphic response value.
    ///
    /// Accepts JSON text or an object; any other shape is logged and
    /// yields an empty document.
    pub fn from_response(value: &Value) -> Self {
        match value {
            Value::String(text) => Self::from_json(text),
            Value::Object(map) => Self::new(map.clone()),
            other => {
                debug!(found = value_type_name(other), "unsupported response shape");
                let doc = Self::empty();
                doc.record(Diagnostic::construction(format!(
                    "unsupported response shape: {}",
                    value_type_name(other)
                )));
                doc
            }
        }
    }

    /// Build a document only if the value actually is an object.
    ///
    /// Unlike [`Document::from_response`], a wrong-shaped value yields no
    /// instance at all rather than an empty one, so the caller can tell
    /// "was not a map" apart from "was an empty map".
    pub fn from_object(value: &Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self::new(map.clone())),
            _ => None,
        }
    }

    // ------------------------------------------------------------------
    // Raw access
    // ------------------------------------------------------------------

    /// Look up a top-level key. Never logs.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.map.get(key)
    }

    /// Resolve a dot-delimited path against this document.
    ///
    /// Failures are appended to the diagnostic log and surface as `None`.
    pub fn resolve(&self, path: &str) -> Option<&Value> {
        match resolve_in(&self.map, path) {
            Ok(value) => Some(value),
            Err(err) => {
                debug!(path, reason = ?err.reason, "path resolution failed");
                self.record(Diagnostic::Resolve(err));
                None
            }
        }
    }

    /// Check whether a path resolves. Never logs and never records a
    /// failure reason.
    #[inline]
    pub fn has_path(&self, path: &str) -> bool {
        resolve_in(&self.map, path).is_ok()
    }

    /// Borrow the underlying object.
    #[inline]
    pub fn as_object(&self) -> &Map<String, Value> {
        &self.map
    }

    /// Consume the wrapper and return the underlying object.
    #[inline]
    pub fn into_object(self) -> Map<String, Value> {
        self.map
    }

    /// The document's keys in insertion order.
    #[inline]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    /// Number of top-level keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// True when the document has no keys.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// True when the key is present (its value may still be null).
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Serialize the document back to JSON text.
    #[inline]
    pub fn to_json(&self) -> String {
        Value::Object(self.map.clone()).to_string()
    }

    /// The document as a JSON value.
    #[inline]
    pub fn to_value(&self) -> Value {
        Value::Object(self.map.clone())
    }

    // ------------------------------------------------------------------
    // Generic getters
    // ------------------------------------------------------------------

    /// Coerce a top-level key with an arbitrary coercer.
    #[inline]
    pub fn get_with<T>(&self, key: &str, coercer: impl Fn(&Value) -> Option<T>) -> Option<T> {
        self.get(key).and_then(|v| coercer(v))
    }

    /// Coerce a path-addressed value with an arbitrary coercer.
    #[inline]
    pub fn get_path_with<T>(&self, path: &str, coercer: impl Fn(&Value) -> Option<T>) -> Option<T> {
        self.resolve(path).and_then(|v| coercer(v))
    }

    /// Apply one coercer to several keys, keeping absent results per key.
    ///
    /// Unlike list coercion, nothing is filtered: every requested key
    /// appears in the result, mapped to its (possibly absent) value.
    pub fn get_batch<T>(
        &self,
        keys: &[&str],
        coercer: impl Fn(&Value) -> Option<T>,
    ) -> BTreeMap<String, Option<T>> {
        keys.iter()
            .map(|k| ((*k).to_owned(), self.get_with(k, &coercer)))
            .collect()
    }

    /// Try keys in order, returning the first that coerces successfully.
    pub fn first_of<T>(&self, keys: &[&str], coercer: impl Fn(&Value) -> Option<T>) -> Option<T> {
        keys.iter().find_map(|k| self.get_with(k, &coercer))
    }

    // ------------------------------------------------------------------
    // Typed getters
    // ------------------------------------------------------------------

    /// Get an integer (flexibly coerced).
    #[inline]
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get_with(key, coerce_i64)
    }

    /// Get an integer at a path.
    #[inline]
    pub fn get_i64_path(&self, path: &str) -> Option<i64> {
        self.get_path_with(path, coerce_i64)
    }

    /// Get an integer, falling back to a default.
    #[inline]
    pub fn get_i64_or(&self, key: &str, default: i64) -> i64 {
        self.get_i64(key).unwrap_or(default)
    }

    /// Get a float (flexibly coerced).
    #[inline]
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get_with(key, coerce_f64)
    }

    /// Get a float at a path.
    #[inline]
    pub fn get_f64_path(&self, path: &str) -> Option<f64> {
        self.get_path_with(path, coerce_f64)
    }

    /// Get a float, falling back to a default.
    #[inline]
    pub fn get_f64_or(&self, key: &str, default: f64) -> f64 {
        self.get_f64(key).unwrap_or(default)
    }

    /// Get a number preserving the integer/float distinction.
    #[inline]
    pub fn get_num(&self, key: &str) -> Option<Num> {
        self.get_with(key, coerce_num)
    }

    /// Get a number at a path.
    #[inline]
    pub fn get_num_path(&self, path: &str) -> Option<Num> {
        self.get_path_with(path, coerce_num)
    }

    /// Get a boolean (flexibly coerced).
    #[inline]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get_with(key, coerce_bool)
    }

    /// Get a boolean at a path.
    #[inline]
    pub fn get_bool_path(&self, path: &str) -> Option<bool> {
        self.get_path_with(path, coerce_bool)
    }

    /// Get a boolean, falling back to a default.
    #[inline]
    pub fn get_bool_or(&self, key: &str, default: bool) -> bool {
        self.get_bool(key).unwrap_or(default)
    }

    /// Get a string (any non-null scalar renders).
    #[inline]
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get_with(key, coerce_string)
    }

    /// Get a string at a path.
    #[inline]
    pub fn get_string_path(&self, path: &str) -> Option<String> {
        self.get_path_with(path, coerce_string)
    }

    /// Get a string, falling back to a default.
    #[inline]
    pub fn get_string_or(&self, key: &str, default: &str) -> String {
        self.get_string(key).unwrap_or_else(|| default.to_owned())
    }

    /// Get a UTC instant (epoch numbers or ISO strings).
    #[inline]
    pub fn get_datetime(&self, key: &str) -> Option<DateTime<Utc>> {
        self.get_with(key, coerce_datetime)
    }

    /// Get a UTC instant at a path.
    #[inline]
    pub fn get_datetime_path(&self, path: &str) -> Option<DateTime<Utc>> {
        self.get_path_with(path, coerce_datetime)
    }

    /// Get a duration (millis, unit maps, ISO or human strings).
    #[inline]
    pub fn get_duration(&self, key: &str) -> Option<Duration> {
        self.get_with(key, coerce_duration)
    }

    /// Get a duration at a path.
    #[inline]
    pub fn get_duration_path(&self, path: &str) -> Option<Duration> {
        self.get_path_with(path, coerce_duration)
    }

    /// Get a leniently parsed URI.
    #[inline]
    pub fn get_uri(&self, key: &str) -> Option<String> {
        self.get_with(key, coerce_uri)
    }

    /// Get a normalized phone number.
    #[inline]
    pub fn get_phone(&self, key: &str) -> Option<String> {
        self.get_with(key, coerce_phone)
    }

    /// Get a slug.
    #[inline]
    pub fn get_slug(&self, key: &str) -> Option<String> {
        self.get_with(key, coerce_slug)
    }

    /// Get a currency amount.
    #[inline]
    pub fn get_currency(&self, key: &str) -> Option<CurrencyValue> {
        self.get_with(key, coerce_currency)
    }

    /// Get a currency amount at a path.
    #[inline]
    pub fn get_currency_path(&self, path: &str) -> Option<CurrencyValue> {
        self.get_path_with(path, coerce_currency)
    }

    /// Get an arbitrary-precision integer.
    #[inline]
    pub fn get_bigint(&self, key: &str) -> Option<BigInt> {
        self.get_with(key, coerce_bigint)
    }

    // ------------------------------------------------------------------
    // Collection getters
    // ------------------------------------------------------------------

    /// Get a list, promoting a bare item and dropping bad elements.
    #[inline]
    pub fn get_list<T>(&self, key: &str, item: impl Fn(&Value) -> Option<T>) -> Option<Vec<T>> {
        self.get_with(key, |v| coerce_list(v, &item))
    }

    /// Get a list at a path.
    #[inline]
    pub fn get_list_path<T>(
        &self,
        path: &str,
        item: impl Fn(&Value) -> Option<T>,
    ) -> Option<Vec<T>> {
        self.get_path_with(path, |v| coerce_list(v, &item))
    }

    /// Get a list of strings.
    #[inline]
    pub fn get_string_list(&self, key: &str) -> Option<Vec<String>> {
        self.get_list(key, coerce_string)
    }

    /// Get a list of integers.
    #[inline]
    pub fn get_i64_list(&self, key: &str) -> Option<Vec<i64>> {
        self.get_list(key, coerce_i64)
    }

    /// Wrap a nested object value as a child document.
    #[inline]
    pub fn get_document(&self, key: &str) -> Option<Document> {
        self.get_with(key, Document::from_object)
    }

    /// Wrap a nested object at a path as a child document.
    #[inline]
    pub fn get_document_path(&self, path: &str) -> Option<Document> {
        self.get_path_with(path, Document::from_object)
    }

    /// Get a list of nested documents (bare object promotes to a
    /// singleton, non-object elements drop).
    #[inline]
    pub fn get_document_list(&self, key: &str) -> Option<Vec<Document>> {
        self.get_list(key, Document::from_object)
    }

    // ------------------------------------------------------------------
    // Structural operations
    // ------------------------------------------------------------------

    /// Shallow merge; the other document's keys win.
    pub fn merge(&self, other: &Document) -> Document {
        Document::new(merge(&self.map, &other.map))
    }

    /// Deep merge; recurses only where both sides hold objects.
    pub fn deep_merge(&self, other: &Document) -> Document {
        match deep_merge(&self.to_value(), &other.to_value()) {
            Value::Object(map) => Document::new(map),
            _ => Document::empty(),
        }
    }

    /// Keys added, removed or changed between this document and another.
    pub fn diff(&self, other: &Document) -> DocumentDiff {
        diff(&self.map, &other.map)
    }

    /// A new document with only the named keys.
    pub fn pick(&self, keys: &[&str]) -> Document {
        Document::new(pick(&self.map, keys))
    }

    /// A new document with every value passed through `f`.
    pub fn map_values(&self, f: impl Fn(&str, &Value) -> Value) -> Document {
        Document::new(map_values(&self.map, f))
    }

    /// Flatten nesting into dot-path leaf entries.
    pub fn flatten(&self) -> Map<String, Value> {
        flatten(&self.map)
    }

    /// Rebuild a document from dot-path leaf entries.
    pub fn unflatten(flat: &Map<String, Value>) -> Document {
        Document::new(unflatten(flat))
    }

    /// Render the document as an HTTP query string.
    pub fn to_query_string(&self, encode: bool) -> String {
        to_query_string(&self.map, encode)
    }

    // ------------------------------------------------------------------
    // Diagnostic log
    // ------------------------------------------------------------------

    /// Snapshot of the diagnostic log.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.log.borrow().clone()
    }

    /// Clear the diagnostic log.
    pub fn clear_diagnostics(&self) {
        self.log.borrow_mut().clear();
    }

    fn record(&self, diagnostic: Diagnostic) {
        self.log.borrow_mut().push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolveReason;
    use serde_json::json;

    fn doc(v: Value) -> Document {
        Document::from_response(&v)
    }

    #[test]
    fn test_from_json_happy_path() {
        let d = Document::from_json(r#"{"a": 1}"#);
        assert_eq!(d.get_i64("a"), Some(1));
        assert!(d.diagnostics().is_empty());
    }

    #[test]
    fn test_from_json_parse_failure_degrades() {
        let d = Document::from_json("{not json");
        assert!(d.is_empty());
        assert_eq!(d.diagnostics().len(), 1);
    }

    #[test]
    fn test_from_json_non_object_degrades() {
        let d = Document::from_json("[1, 2, 3]");
        assert!(d.is_empty());
        assert!(matches!(
            d.diagnostics()[0],
            Diagnostic::Construction { .. }
        ));
    }

    #[test]
    fn test_from_response_shapes() {
        assert_eq!(doc(json!({"a": 1})).get_i64("a"), Some(1));
        assert_eq!(
            Document::from_response(&json!(r#"{"a": 1}"#)).get_i64("a"),
            Some(1)
        );

        let bad = Document::from_response(&json!(42));
        assert!(bad.is_empty());
        assert_eq!(bad.diagnostics().len(), 1);
    }

    #[test]
    fn test_from_object_distinguishes_shape_from_emptiness() {
        assert!(Document::from_object(&json!({})).is_some());
        assert!(Document::from_object(&json!([])).is_none());
        assert!(Document::from_object(&json!("{}")).is_none());
        assert!(Document::from_object(&json!(null)).is_none());
    }

    #[test]
    fn test_typed_getters_coerce() {
        let d = doc(json!({
            "count": "42",
            "ratio": "2.5",
            "flag": 1,
            "name": 99
        }));
        assert_eq!(d.get_i64("count"), Some(42));
        assert_eq!(d.get_f64("ratio"), Some(2.5));
        assert_eq!(d.get_bool("flag"), Some(true));
        assert_eq!(d.get_string("name"), Some("99".into()));
    }

    #[test]
    fn test_or_defaults() {
        let d = doc(json!({"present": "7"}));
        assert_eq!(d.get_i64_or("present", 0), 7);
        assert_eq!(d.get_i64_or("missing", -1), -1);
        assert_eq!(d.get_string_or("missing", "fallback"), "fallback");
        assert_eq!(d.get_bool_or("missing", true), true);
    }

    #[test]
    fn test_path_getters_log_failures() {
        let d = doc(json!({"stock": {"count": "42"}}));
        assert_eq!(d.get_i64_path("stock.count"), Some(42));
        assert!(d.diagnostics().is_empty());

        assert_eq!(d.get_i64_path("stock.missing"), None);
        let log = d.diagnostics();
        assert_eq!(log.len(), 1);
        match &log[0] {
            Diagnostic::Resolve(err) => assert_eq!(err.reason, ResolveReason::KeyNotFound),
            other => panic!("unexpected diagnostic: {other:?}"),
        }

        d.clear_diagnostics();
        assert!(d.diagnostics().is_empty());
    }

    #[test]
    fn test_has_path_never_logs() {
        let d = doc(json!({"a": 1}));
        assert!(d.has_path("a"));
        assert!(!d.has_path("a.b.c"));
        assert!(d.diagnostics().is_empty());
    }

    #[test]
    fn test_batch_preserves_absent() {
        let d = doc(json!({"a": "1", "b": "x"}));
        let batch = d.get_batch(&["a", "b", "c"], coerce_i64);
        assert_eq!(batch["a"], Some(1));
        assert_eq!(batch["b"], None);
        assert_eq!(batch["c"], None);
        assert_eq!(batch.len(), 3);
    }

    #[test]
    fn test_first_of_fallback_order() {
        let d = doc(json!({"total_count": "10", "total": "20"}));
        assert_eq!(d.first_of(&["total", "total_count"], coerce_i64), Some(20));
        assert_eq!(d.first_of(&["count", "total_count"], coerce_i64), Some(10));
        assert_eq!(d.first_of(&["x", "y"], coerce_i64), None);
    }

    #[test]
    fn test_nested_documents() {
        let d = doc(json!({
            "user": {"name": "alice"},
            "items": [{"id": 1}, "oops", {"id": 2}],
            "single": {"id": 3}
        }));
        assert_eq!(
            d.get_document("user").and_then(|u| u.get_string("name")),
            Some("alice".into())
        );
        assert_eq!(d.get_document("missing"), None);

        // Non-object elements drop; a bare object promotes.
        let items = d.get_document_list("items").unwrap();
        assert_eq!(items.len(), 2);
        let single = d.get_document_list("single").unwrap();
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].get_i64("id"), Some(3));
    }

    #[test]
    fn test_structural_equality_ignores_log() {
        let a = doc(json!({"x": 1}));
        let b = doc(json!({"x": 1}));
        let _ = a.get_i64_path("x.y"); // pollute a's log
        assert_eq!(a, b);
    }

    #[test]
    fn test_to_json_round_trip() {
        let d = doc(json!({"a": 1, "b": [true, null]}));
        let back = Document::from_json(&d.to_json());
        assert_eq!(d, back);
    }
}
