//! Read-only brand endpoints.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use horology_core::error::CoreError;
use horology_core::search::parse_ordering;
use horology_core::types::DbId;
use horology_db::models::brand::BrandListParams;
use horology_db::repositories::brand_repo::{BRAND_ORDERING_FIELDS, DEFAULT_BRAND_ORDERING};
use horology_db::repositories::BrandRepo;

use crate::error::{AppError, AppResult};
use crate::query::PageWindow;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// GET /api/v1/brands
///
/// Search on name and country, ordering by `name` or `founded_year`.
pub async fn list_brands(
    State(state): State<AppState>,
    Query(params): Query<BrandListParams>,
) -> AppResult<impl IntoResponse> {
    let ordering = parse_ordering(
        params.ordering.as_deref(),
        BRAND_ORDERING_FIELDS,
        DEFAULT_BRAND_ORDERING,
    )?;
    let window = PageWindow::resolve(params.limit, params.offset);
    let search = params.search.as_deref();

    let (brands, total) = tokio::try_join!(
        BrandRepo::list(&state.pool, search, ordering, window.limit, window.offset),
        BrandRepo::count(&state.pool, search),
    )?;

    let media_url = &state.config.media_url;
    Ok(Json(PageResponse {
        data: brands
            .into_iter()
            .map(|b| b.with_media_url(media_url))
            .collect(),
        total,
        limit: window.limit,
        offset: window.offset,
    }))
}

/// GET /api/v1/brands/{id}
pub async fn get_brand(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let brand = BrandRepo::find_summary(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Brand",
            id,
        }))?;

    Ok(Json(DataResponse {
        data: brand.with_media_url(&state.config.media_url),
    }))
}
