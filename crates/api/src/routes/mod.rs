pub mod admin;
pub mod brands;
pub mod charts;
pub mod complications;
pub mod health;
pub mod watches;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /brands                                   list
/// /brands/{id}                              detail
///
/// /complications                            list
/// /complications/{id}                       detail
///
/// /watches                                  filtered list
/// /watches/{id}                             detail
/// /watches/{id}/certificate                 certificate PDF
/// /watches/export-certificates              certificates PDF (POST)
/// /watches/export-pdf                       catalog PDF (POST)
/// /watches/export-wishlist                  wishlist PDF (POST)
/// /watches/export-comparison                comparison PDF (POST)
///
/// /charts                                   both charts, base64 JSON
/// /charts/movements                         movement donut PNG
/// /charts/prices                            brand price bars PNG
///
/// /admin/export/database                    JSON dump (admin)
/// /admin/brands[/{id}]                      create, update, delete (admin)
/// /admin/complications[/{id}]               create, update, delete (admin)
/// /admin/watches[/{id}]                     create, update, delete (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/brands", brands::router())
        .nest("/complications", complications::router())
        .nest("/watches", watches::router())
        .nest("/charts", charts::router())
        .nest("/admin", admin::router())
}
