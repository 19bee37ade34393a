//! Read-only complication endpoints.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use horology_core::error::CoreError;
use horology_core::types::DbId;
use horology_db::models::complication::ComplicationListParams;
use horology_db::repositories::ComplicationRepo;

use crate::error::{AppError, AppResult};
use crate::query::PageWindow;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// GET /api/v1/complications
pub async fn list_complications(
    State(state): State<AppState>,
    Query(params): Query<ComplicationListParams>,
) -> AppResult<impl IntoResponse> {
    let window = PageWindow::resolve(params.limit, params.offset);
    let search = params.search.as_deref();

    let (complications, total) = tokio::try_join!(
        ComplicationRepo::list(&state.pool, search, window.limit, window.offset),
        ComplicationRepo::count(&state.pool, search),
    )?;

    Ok(Json(PageResponse {
        data: complications,
        total,
        limit: window.limit,
        offset: window.offset,
    }))
}

/// GET /api/v1/complications/{id}
pub async fn get_complication(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let complication = ComplicationRepo::find_summary(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Complication",
            id,
        }))?;

    Ok(Json(DataResponse { data: complication }))
}
