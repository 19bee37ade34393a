//! Route definitions for the `/admin` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require the admin bearer token (enforced by handler extractors).
///
/// ```text
/// GET    /export/database        -> export_database
/// POST   /brands                 -> create_brand
/// PUT    /brands/{id}            -> update_brand
/// DELETE /brands/{id}            -> delete_brand
/// POST   /complications          -> create_complication
/// PUT    /complications/{id}     -> update_complication
/// DELETE /complications/{id}     -> delete_complication
/// POST   /watches                -> create_watch
/// PUT    /watches/{id}           -> update_watch
/// DELETE /watches/{id}           -> delete_watch
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/export/database", get(admin::export_database))
        .route("/brands", post(admin::create_brand))
        .route(
            "/brands/{id}",
            put(admin::update_brand).delete(admin::delete_brand),
        )
        .route("/complications", post(admin::create_complication))
        .route(
            "/complications/{id}",
            put(admin::update_complication).delete(admin::delete_complication),
        )
        .route("/watches", post(admin::create_watch))
        .route(
            "/watches/{id}",
            put(admin::update_watch).delete(admin::delete_watch),
        )
}
