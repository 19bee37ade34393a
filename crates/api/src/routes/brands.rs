//! Route definitions for the `/brands` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::brands;
use crate::state::AppState;

/// Routes mounted at `/brands`.
///
/// ```text
/// GET /        -> list_brands
/// GET /{id}    -> get_brand
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(brands::list_brands))
        .route("/{id}", get(brands::get_brand))
}
