//! Fluent validation over a document's coercing getters.
//!
//! A thin rules layer: each rule reads through the flexible getters, so a
//! field holding `"42"` satisfies an integer rule. The builder owns its
//! accumulated errors and moves through the chain; nothing is mutated
//! behind the caller's back.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::document::Document;
use crate::scalar::{coerce_bool, coerce_f64, coerce_i64, coerce_num};

/// A single failed rule.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// The field the rule applied to.
    pub field: String,
    /// What the rule expected.
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_owned(),
            message: message.into(),
        }
    }
}

/// The outcome of running a validation chain.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Every rule failure, in rule order.
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    /// True when no rule failed.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Fluent rule accumulator over one document.
///
/// Presence is checked only by [`required`](Validator::required); every
/// other rule passes vacuously when the field is missing or null, so
/// optional fields validate without extra ceremony.
///
/// # Examples
///
/// ```
/// use pliant_json::Document;
/// use serde_json::json;
///
/// let doc = Document::from_response(&json!({"name": "ada", "age": "36"}));
/// let report = doc
///     .validate()
///     .required("name")
///     .min_len("name", 2)
///     .required("age")
///     .integer("age")
///     .min("age", 0.0)
///     .finish();
/// assert!(report.is_valid());
/// ```
#[derive(Debug)]
pub struct Validator<'a> {
    doc: &'a Document,
    errors: Vec<ValidationError>,
}

impl Document {
    /// Start a validation chain over this document.
    pub fn validate(&self) -> Validator<'_> {
        Validator {
            doc: self,
            errors: Vec::new(),
        }
    }
}

impl<'a> Validator<'a> {
    // Ties the borrow to the document, not to `self`, so rule methods
    // can consume the builder inside a match arm.
    fn present(&self, field: &str) -> Option<&'a Value> {
        self.doc.get(field).filter(|v| !v.is_null())
    }

    fn fail(mut self, field: &str, message: impl Into<String>) -> Self {
        self.errors.push(ValidationError::new(field, message));
        self
    }

    /// The field must be present and non-null.
    pub fn required(self, field: &str) -> Self {
        if self.present(field).is_none() {
            return self.fail(field, "is required");
        }
        self
    }

    /// The field, when present, must coerce to an integer.
    pub fn integer(self, field: &str) -> Self {
        match self.present(field) {
            Some(v) if coerce_i64(v).is_none() => self.fail(field, "must be an integer"),
            _ => self,
        }
    }

    /// The field, when present, must coerce to a number.
    pub fn number(self, field: &str) -> Self {
        match self.present(field) {
            Some(v) if coerce_num(v).is_none() => self.fail(field, "must be a number"),
            _ => self,
        }
    }

    /// The field, when present, must coerce to a boolean.
    pub fn boolean(self, field: &str) -> Self {
        match self.present(field) {
            Some(v) if coerce_bool(v).is_none() => self.fail(field, "must be a boolean"),
            _ => self,
        }
    }

    /// The field, when present, must be a string.
    pub fn string(self, field: &str) -> Self {
        match self.present(field) {
            Some(v) if !v.is_string() => self.fail(field, "must be a string"),
            _ => self,
        }
    }

    /// The field, when present, must be numerically at least `min`.
    pub fn min(self, field: &str, min: f64) -> Self {
        match self.present(field).and_then(coerce_f64) {
            Some(n) if n < min => self.fail(field, format!("must be at least {min}")),
            _ => self,
        }
    }

    /// The field, when present, must be numerically at most `max`.
    pub fn max(self, field: &str, max: f64) -> Self {
        match self.present(field).and_then(coerce_f64) {
            Some(n) if n > max => self.fail(field, format!("must be at most {max}")),
            _ => self,
        }
    }

    /// The field, when present as a string, must have at least
    /// `min` characters.
    pub fn min_len(self, field: &str, min: usize) -> Self {
        match self.present(field).and_then(Value::as_str) {
            Some(s) if s.chars().count() < min => {
                self.fail(field, format!("must have at least {min} characters"))
            }
            _ => self,
        }
    }

    /// The field, when present as a string, must have at most
    /// `max` characters.
    pub fn max_len(self, field: &str, max: usize) -> Self {
        match self.present(field).and_then(Value::as_str) {
            Some(s) if s.chars().count() > max => {
                self.fail(field, format!("must have at most {max} characters"))
            }
            _ => self,
        }
    }

    /// The field, when present as a string, must look like an email
    /// address (a coarse shape check, not RFC validation).
    pub fn email(self, field: &str) -> Self {
        match self.present(field).and_then(Value::as_str) {
            Some(s) if !looks_like_email(s) => self.fail(field, "must be an email address"),
            _ => self,
        }
    }

    /// The field, when present, must satisfy `predicate`.
    pub fn matches(
        self,
        field: &str,
        message: &str,
        predicate: impl FnOnce(&Value) -> bool,
    ) -> Self {
        match self.present(field) {
            Some(v) if !predicate(v) => {
                let msg = message.to_owned();
                self.fail(field, msg)
            }
            _ => self,
        }
    }

    /// Consume the chain and return the accumulated report.
    pub fn finish(self) -> ValidationReport {
        ValidationReport {
            errors: self.errors,
        }
    }
}

fn looks_like_email(s: &str) -> bool {
    match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}
