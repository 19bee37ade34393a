//! Watch catalog endpoints: filtered listing and detail.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use horology_core::error::CoreError;
use horology_core::search::parse_ordering;
use horology_core::types::DbId;
use horology_db::models::watch::{WatchFilter, WatchSummary};
use horology_db::repositories::watch_repo::{DEFAULT_WATCH_ORDERING, WATCH_ORDERING_FIELDS};
use horology_db::repositories::WatchRepo;

use crate::error::{AppError, AppResult};
use crate::query::PageWindow;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// GET /api/v1/watches
///
/// Exact, range and free-text filters; see [`WatchFilter`].
pub async fn list_watches(
    State(state): State<AppState>,
    Query(filter): Query<WatchFilter>,
) -> AppResult<impl IntoResponse> {
    let ordering = parse_ordering(
        filter.ordering.as_deref(),
        WATCH_ORDERING_FIELDS,
        DEFAULT_WATCH_ORDERING,
    )?;
    let window = PageWindow::resolve(filter.limit, filter.offset);

    let (rows, total) = tokio::try_join!(
        WatchRepo::list(&state.pool, &filter, ordering, window.limit, window.offset),
        WatchRepo::count(&state.pool, &filter),
    )?;

    let media_url = &state.config.media_url;
    let data: Vec<WatchSummary> = rows
        .into_iter()
        .map(|row| WatchSummary::from_row(row, media_url))
        .collect();

    Ok(Json(PageResponse {
        data,
        total,
        limit: window.limit,
        offset: window.offset,
    }))
}

/// GET /api/v1/watches/{id}
pub async fn get_watch(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let watch = WatchRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Watch",
            id,
        }))?;

    Ok(Json(DataResponse {
        data: watch.with_media_url(&state.config.media_url),
    }))
}
