//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope per project conventions.
//! Paginated listings add `total`, `limit` and `offset` next to `data`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": [T], "total": n, "limit": l, "offset": o }` envelope for listings.
#[derive(Debug, Serialize)]
pub struct PageResponse<T: Serialize> {
    pub data: Vec<T>,
    /// Number of rows matching the filters, ignoring pagination.
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}
