//! Route definitions for the `/complications` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::complications;
use crate::state::AppState;

/// Routes mounted at `/complications`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(complications::list_complications))
        .route("/{id}", get(complications::get_complication))
}
