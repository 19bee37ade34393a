//! Route definitions for the `/watches` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{exports, watches};
use crate::state::AppState;

/// Routes mounted at `/watches`.
///
/// ```text
/// GET  /                      -> list_watches
/// GET  /{id}                  -> get_watch
/// GET  /{id}/certificate      -> watch_certificate
/// POST /export-certificates   -> export_certificates
/// POST /export-pdf            -> export_catalog
/// POST /export-wishlist       -> export_wishlist
/// POST /export-comparison     -> export_comparison
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(watches::list_watches))
        .route("/{id}", get(watches::get_watch))
        .route("/{id}/certificate", get(exports::watch_certificate))
        .route("/export-certificates", post(exports::export_certificates))
        .route("/export-pdf", post(exports::export_catalog))
        .route("/export-wishlist", post(exports::export_wishlist))
        .route("/export-comparison", post(exports::export_comparison))
}
