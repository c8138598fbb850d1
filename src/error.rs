//! Failure types for path resolution and the document diagnostic log.
//!
//! Coercion failures are never represented here: a scalar coercer that
//! cannot produce a value returns `None` and nothing else. Only path
//! resolution and wrapper construction produce structured failures, and
//! those are recorded as values, never raised.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a path traversal stopped before consuming every segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolveReason {
    /// The path string was empty.
    EmptyPath,
    /// The current node is an object but does not contain the segment key.
    KeyNotFound,
    /// The current node is an array and the segment index is past its end.
    IndexOutOfBounds,
    /// The current node is an array but the segment is not a base-10 index.
    InvalidIndex,
    /// The current node is a scalar and cannot be descended into.
    Scalar,
    /// A null value was reached with path segments still remaining.
    NullMidPath,
}

impl ResolveReason {
    /// Short human-readable description used in log output.
    pub fn describe(&self) -> &'static str {
        match self {
            ResolveReason::EmptyPath => "path cannot be empty",
            ResolveReason::KeyNotFound => "key not found",
            ResolveReason::IndexOutOfBounds => "index out of bounds",
            ResolveReason::InvalidIndex => "invalid array index",
            ResolveReason::Scalar => "cannot descend into non-object/non-array value",
            ResolveReason::NullMidPath => "path resolved to null",
        }
    }
}

/// A failed path resolution.
///
/// Carries the segment that could not be consumed and the portion of the
/// path that had been walked successfully before the failure.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{} at `{walked}` (segment `{segment}`)", reason.describe())]
pub struct ResolveError {
    /// The reason the traversal stopped.
    pub reason: ResolveReason,
    /// The segment that failed to resolve (empty for an empty path).
    pub segment: String,
    /// The dot-joined partial path successfully walked before the failure.
    pub walked: String,
}

impl ResolveError {
    /// Create a resolve error.
    #[inline]
    pub fn new(
        reason: ResolveReason,
        segment: impl Into<String>,
        walked: impl Into<String>,
    ) -> Self {
        Self {
            reason,
            segment: segment.into(),
            walked: walked.into(),
        }
    }

    /// Create an empty-path error.
    #[inline]
    pub fn empty_path() -> Self {
        Self::new(ResolveReason::EmptyPath, "", "")
    }
}

/// One entry in a document wrapper's diagnostic log.
///
/// The log is append-only and private to a wrapper instance; callers who
/// never read it observe only silent absence.
#[derive(Clone, Debug, PartialEq, Error, Serialize, Deserialize)]
pub enum Diagnostic {
    /// A path lookup failed.
    #[error("resolve failed: {0}")]
    Resolve(#[from] ResolveError),

    /// The wrapper was constructed from input it could not use.
    #[error("construction failed: {message}")]
    Construction {
        /// What was wrong with the input.
        message: String,
    },
}

impl Diagnostic {
    /// Create a construction diagnostic.
    #[inline]
    pub fn construction(message: impl Into<String>) -> Self {
        Diagnostic::Construction {
            message: message.into(),
        }
    }
}

/// Get the type name of a JSON value.
#[inline]
pub fn value_type_name(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_error_display() {
        let err = ResolveError::new(ResolveReason::KeyNotFound, "count", "stock");
        let text = err.to_string();
        assert!(text.contains("key not found"));
        assert!(text.contains("stock"));
        assert!(text.contains("count"));
    }

    #[test]
    fn test_empty_path_error() {
        let err = ResolveError::empty_path();
        assert_eq!(err.reason, ResolveReason::EmptyPath);
        assert!(err.to_string().contains("path cannot be empty"));
    }

    #[test]
    fn test_diagnostic_from_resolve_error() {
        let diag: Diagnostic = ResolveError::empty_path().into();
        assert!(matches!(diag, Diagnostic::Resolve(_)));
    }

    #[test]
    fn test_value_type_name() {
        use serde_json::json;

        assert_eq!(value_type_name(&json!(null)), "null");
        assert_eq!(value_type_name(&json!(true)), "boolean");
        assert_eq!(value_type_name(&json!(42)), "number");
        assert_eq!(value_type_name(&json!("hello")), "string");
        assert_eq!(value_type_name(&json!([1, 2, 3])), "array");
        assert_eq!(value_type_name(&json!({"a": 1})), "object");
    }
}
