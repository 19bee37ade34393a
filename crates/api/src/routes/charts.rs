//! Route definitions for the `/charts` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::charts;
use crate::state::AppState;

/// Routes mounted at `/charts`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(charts::chart_bundle))
        .route("/movements", get(charts::movement_chart))
        .route("/prices", get(charts::price_chart))
}
