//! Defensive JSON normalization: flexible coercion plus path-addressed
//! document access.
//!
//! APIs send numbers as strings, booleans as `"1"`, dates as either ISO
//! strings or epoch numbers, and bare items where arrays were promised.
//! `pliant_json` converts those loosely-typed shapes into strongly-typed
//! values without ever throwing: anything unparseable collapses to an
//! absent `Option`, and the only record of what went wrong is a
//! per-document diagnostic log the caller may inspect or ignore.
//!
//! # Core pieces
//!
//! - **Scalar coercers**: [`coerce_i64`], [`coerce_bool`],
//!   [`coerce_datetime`], [`coerce_duration`], [`coerce_currency`] and
//!   friends, pure total functions from any [`serde_json::Value`] to a
//!   typed `Option`.
//! - **Collection coercers**: [`coerce_list`] (drops bad elements,
//!   promotes a bare item to a singleton) and [`coerce_map`].
//! - **Path resolver**: [`resolve`] walks `"a.b.0.c"` style paths
//!   through objects and arrays, reporting structured failures.
//! - **[`Document`]**: wraps one JSON object with typed getters, batch
//!   and fallback access, structural operations and a fluent
//!   [`validate`](Document::validate) chain.
//!
//! # Quick start
//!
//! ```
//! use pliant_json::Document;
//! use serde_json::json;
//!
//! let doc = Document::from_response(&json!({
//!     "id": "42",
//!     "active": "1",
//!     "price": "$19.99",
//!     "stock": {"count": "7"},
//!     "tags": "solo"
//! }));
//!
//! assert_eq!(doc.get_i64("id"), Some(42));
//! assert_eq!(doc.get_bool("active"), Some(true));
//! assert_eq!(doc.get_currency("price").unwrap().amount, 19.99);
//! assert_eq!(doc.get_i64_path("stock.count"), Some(7));
//! assert_eq!(doc.get_string_list("tags"), Some(vec!["solo".to_string()]));
//! ```
//!
//! # Failure model
//!
//! Scalar coercion failure is silent absence; "missing", "null" and
//! "unparseable" are deliberately indistinguishable. Path and
//! construction failures additionally land in the document's log. No
//! malformed input panics.
//!
//! # Threading
//!
//! Everything is synchronous, in-memory computation. A [`Document`] is
//! not `Sync` (its log uses interior mutability); keep each instance on
//! one thread.

#![warn(missing_docs)]

mod api;
mod collection;
mod currency;
mod document;
mod error;
mod path;
mod scalar;
mod temporal;
mod text;
mod transform;
mod validate;

pub use api::{extract_error, extract_pagination, extract_timestamp, is_success, ApiError, Pagination};
pub use collection::{coerce_list, coerce_list_required, coerce_map, coerce_map_required};
pub use currency::{
    coerce_currency, coerce_currency_required, CurrencyValue, CURRENCY_SYMBOLS,
};
pub use document::Document;
pub use error::{value_type_name, Diagnostic, ResolveError, ResolveReason};
pub use path::{has_path, resolve, resolve_in, Path};
pub use scalar::{
    coerce_bigint, coerce_bigint_required, coerce_bool, coerce_bool_required, coerce_enum,
    coerce_f64, coerce_f64_required, coerce_i64, coerce_i64_required, coerce_num,
    coerce_num_required, coerce_string, coerce_string_required, Num,
};
pub use temporal::{
    coerce_datetime, coerce_datetime_required, coerce_duration, coerce_duration_required,
    EPOCH_MILLIS_THRESHOLD,
};
pub use text::{
    coerce_card_number, coerce_phone, coerce_phone_required, coerce_slug, coerce_slug_required,
    coerce_uri, coerce_uri_required, luhn_valid,
};
pub use transform::{
    deep_merge, diff, flatten, map_values, merge, pick, to_query_string, unflatten, DocumentDiff,
    ValueChange,
};
pub use validate::{ValidationError, ValidationReport, Validator};

// Re-export the value type for convenience.
pub use serde_json::Value;
