//! Listing helpers: pagination clamps, free-text search terms and `ordering`
//! parameter parsing.
//!
//! Lives in `core` so the repositories and the HTTP layer agree on the
//! exact same rules.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default number of rows per page.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Maximum number of rows per page.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Clamp a user-provided limit to `[1, max]`, defaulting when absent.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

// ---------------------------------------------------------------------------
// Free-text search
// ---------------------------------------------------------------------------

/// Split a search string into whitespace-separated terms.
///
/// Returns `None` when the input contains no terms, so callers can skip the
/// search clause entirely.
pub fn search_terms(query: &str) -> Option<Vec<&str>> {
    let terms: Vec<&str> = query.split_whitespace().collect();
    if terms.is_empty() {
        None
    } else {
        Some(terms)
    }
}

/// Build an `ILIKE` substring pattern, escaping `%`, `_` and `\` in the term.
///
/// Patterns are meant to be used with `ESCAPE '\'`.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// A validated `ordering` parameter: one allowed field plus a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ordering {
    pub field: &'static str,
    pub direction: SortDirection,
}

/// Parse an `ordering` value such as `price` or `-created_at`.
///
/// `allowed` is the whitelist of sortable fields; the returned field is the
/// whitelisted `&'static str`, never user input, so it is safe to splice
/// into SQL.
pub fn parse_ordering(
    value: Option<&str>,
    allowed: &[&'static str],
    default: Ordering,
) -> Result<Ordering, CoreError> {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(default);
    };

    let (name, direction) = match raw.strip_prefix('-') {
        Some(rest) => (rest, SortDirection::Desc),
        None => (raw, SortDirection::Asc),
    };

    allowed
        .iter()
        .copied()
        .find(|field| *field == name)
        .map(|field| Ordering { field, direction })
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "Cannot order by '{name}'. Allowed fields: {}",
                allowed.join(", ")
            ))
        })
}
