//! Dot-delimited paths and the traversal that resolves them.
//!
//! A path like `"order.items.0.sku"` addresses a location inside a JSON
//! document. Segments are plain strings; whether a segment is used as an
//! object key or an array index is decided at resolution time by the shape
//! of the node being walked. `"0"` against an object is a key lookup,
//! against an array it is an index.

use crate::error::{ResolveError, ResolveReason};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// An immutable sequence of path segments.
///
/// Constructed fresh per resolution call by splitting a dot-delimited
/// string; not cached or reused across calls.
///
/// # Examples
///
/// ```
/// use pliant_json::Path;
///
/// let path = Path::parse("users.0.name");
/// assert_eq!(path.len(), 3);
/// assert_eq!(path.to_string(), "users.0.name");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Path(Vec<String>);

impl Path {
    /// Create an empty path.
    #[inline]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Parse a dot-delimited path string into segments.
    ///
    /// An empty string yields the empty path, which every resolution
    /// rejects with an empty-path failure.
    pub fn parse(path: &str) -> Self {
        if path.is_empty() {
            return Self::root();
        }
        Self(path.split('.').map(str::to_owned).collect())
    }

    /// Create a path from pre-split segments.
    #[inline]
    pub fn from_segments(segments: Vec<String>) -> Self {
        Self(segments)
    }

    /// Append a segment and return self (builder pattern).
    #[inline]
    pub fn seg(mut self, segment: impl Into<String>) -> Self {
        self.0.push(segment.into());
        self
    }

    /// Get the segments of this path.
    #[inline]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Check if this path is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the segments.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Path::parse(s)
    }
}

impl FromIterator<String> for Path {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Path(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Resolve a dot-delimited path against a JSON value.
///
/// Walks objects by key and arrays by base-10 index. The traversal is
/// total: malformed paths and wrong-shaped documents produce a
/// [`ResolveError`], never a panic.
///
/// A null *leaf* is a successful resolution; a null encountered with
/// segments still remaining is a failure.
///
/// # Examples
///
/// ```
/// use pliant_json::resolve;
/// use serde_json::json;
///
/// let doc = json!({"stock": {"count": "42"}});
/// assert_eq!(resolve(&doc, "stock.count").unwrap(), &json!("42"));
///
/// let doc = json!({"items": [1, 2, 3]});
/// assert!(resolve(&doc, "items.5").is_err());
/// ```
pub fn resolve<'a>(root: &'a Value, path: &str) -> Result<&'a Value, ResolveError> {
    let path = Path::parse(path);
    if path.is_empty() {
        return Err(ResolveError::empty_path());
    }

    let mut current = root;
    let mut walked: Vec<&str> = Vec::new();

    for segment in path.iter() {
        current = step(current, segment, &walked)?;
        walked.push(segment);
    }

    Ok(current)
}

/// Resolve a path against a bare JSON object, without wrapping it in a
/// `Value` first. Same traversal as [`resolve`].
pub fn resolve_in<'a>(
    map: &'a serde_json::Map<String, Value>,
    path: &str,
) -> Result<&'a Value, ResolveError> {
    let path = Path::parse(path);
    let mut segments = path.iter();
    let first = match segments.next() {
        Some(segment) => segment,
        None => return Err(ResolveError::empty_path()),
    };
    let mut current = map
        .get(first)
        .ok_or_else(|| ResolveError::new(ResolveReason::KeyNotFound, first, ""))?;
    let mut walked = vec![first];

    for segment in segments {
        current = step(current, segment, &walked)?;
        walked.push(segment);
    }

    Ok(current)
}

/// Descend one segment into a value.
fn step<'a>(current: &'a Value, segment: &str, walked: &[&str]) -> Result<&'a Value, ResolveError> {
    let fail = |reason| ResolveError::new(reason, segment, walked.join("."));

    match current {
        Value::Null => Err(fail(ResolveReason::NullMidPath)),
        Value::Object(map) => map.get(segment).ok_or_else(|| fail(ResolveReason::KeyNotFound)),
        Value::Array(items) => {
            let index: usize = segment
                .parse()
                .map_err(|_| fail(ResolveReason::InvalidIndex))?;
            items
                .get(index)
                .ok_or_else(|| fail(ResolveReason::IndexOutOfBounds))
        }
        _ => Err(fail(ResolveReason::Scalar)),
    }
}

/// Check whether a path resolves, without reporting why it would not.
///
/// Runs the identical traversal to [`resolve`] but returns a plain
/// boolean and records nothing.
#[inline]
pub fn has_path(root: &Value, path: &str) -> bool {
    resolve(root, path).is_ok()
}
