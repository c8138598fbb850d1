//! Conveniences for common API response shapes.
//!
//! Real-world APIs disagree on field names for pagination, errors and
//! timestamps. These helpers try the usual spellings in order through the
//! document's fallback getter and hand back small typed summaries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::scalar::{coerce_bool, coerce_i64, coerce_string};
use crate::temporal::coerce_datetime;

/// Pagination fields extracted from a response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page, defaulting to 1.
    pub page: i64,
    /// Items per page, when reported.
    pub per_page: Option<i64>,
    /// Total item count, when reported.
    pub total: Option<i64>,
    /// Total page count, when reported.
    pub total_pages: Option<i64>,
    /// Whether another page exists, derived when not reported directly.
    pub has_more: bool,
}

/// Extract pagination from the usual field spellings.
///
/// Returns `None` when no pagination-looking field is present at all.
///
/// # Examples
///
/// ```
/// use pliant_json::{extract_pagination, Document};
/// use serde_json::json;
///
/// let doc = Document::from_response(&json!({
///     "current_page": "2", "page_size": 25, "total_count": "120"
/// }));
/// let p = extract_pagination(&doc).unwrap();
/// assert_eq!(p.page, 2);
/// assert_eq!(p.per_page, Some(25));
/// assert_eq!(p.total, Some(120));
/// assert!(p.has_more);
/// ```
pub fn extract_pagination(doc: &Document) -> Option<Pagination> {
    let page = doc.first_of(&["page", "current_page", "currentPage"], coerce_i64);
    let per_page = doc.first_of(
        &["per_page", "perPage", "page_size", "pageSize", "limit"],
        coerce_i64,
    );
    let total = doc.first_of(&["total", "total_count", "totalCount", "count"], coerce_i64);
    let total_pages = doc.first_of(
        &["total_pages", "totalPages", "last_page", "lastPage"],
        coerce_i64,
    );

    if page.is_none() && per_page.is_none() && total.is_none() && total_pages.is_none() {
        return None;
    }

    let page = page.unwrap_or(1);
    let total_pages = total_pages.or_else(|| match (total, per_page) {
        // Ceiling division; overflow on absurd totals degrades to unknown.
        (Some(t), Some(p)) if p > 0 => t.checked_add(p - 1).map(|n| n / p),
        _ => None,
    });
    let has_more = doc
        .first_of(&["has_more", "hasMore", "has_next", "hasNext"], coerce_bool)
        .unwrap_or_else(|| total_pages.map(|tp| page < tp).unwrap_or(false));

    Some(Pagination {
        page,
        per_page,
        total,
        total_pages,
        has_more,
    })
}

/// An error payload extracted from a response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable message.
    pub message: String,
    /// Machine-readable code, when reported.
    pub code: Option<String>,
    /// Numeric status, when reported.
    pub status: Option<i64>,
}

/// Extract an error from the usual field spellings.
///
/// Looks at `error`/`message`/`detail`/`error_message`; a nested
/// `{"error": {...}}` object is descended into first.
pub fn extract_error(doc: &Document) -> Option<ApiError> {
    if let Some(nested) = doc.get_document("error") {
        if let Some(mut err) = extract_error(&nested) {
            if err.status.is_none() {
                err.status = doc.first_of(&["status", "status_code", "statusCode"], coerce_i64);
            }
            return Some(err);
        }
    }

    let message = doc.first_of(
        &["error", "message", "detail", "error_message", "errorMessage"],
        coerce_string,
    )?;
    let code = doc.first_of(&["code", "error_code", "errorCode"], coerce_string);
    let status = doc.first_of(&["status", "status_code", "statusCode"], coerce_i64);

    Some(ApiError {
        message,
        code,
        status,
    })
}

/// Extract a creation/update timestamp from the usual field spellings.
pub fn extract_timestamp(doc: &Document) -> Option<DateTime<Utc>> {
    doc.first_of(
        &[
            "created_at",
            "createdAt",
            "created",
            "updated_at",
            "updatedAt",
            "timestamp",
            "time",
        ],
        coerce_datetime,
    )
}

/// Read a response's success flag.
///
/// True for a truthy `success`/`ok` field, a `status` string of
/// `"success"`/`"ok"`, or a 2xx numeric `status`/`code`.
pub fn is_success(doc: &Document) -> bool {
    if let Some(flag) = doc.first_of(&["success", "ok"], coerce_bool) {
        return flag;
    }
    if let Some(status) = doc.get_string("status") {
        if status.eq_ignore_ascii_case("success") || status.eq_ignore_ascii_case("ok") {
            return true;
        }
    }
    if let Some(code) = doc.first_of(&["status", "status_code", "code"], coerce_i64) {
        return (200..300).contains(&code);
    }
    false
}
