//! Chart endpoints: PNG images and the base64 bundle.

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use horology_db::repositories::stats_repo::TOP_BRANDS_BY_PRICE;
use horology_db::repositories::StatsRepo;
use horology_reports::charts::{self, NO_DATA_MESSAGE};
use serde::Serialize;

use crate::error::AppResult;
use crate::handlers::attachment;
use crate::response::DataResponse;
use crate::state::AppState;

/// Both charts as base64-encoded PNG, `null` when there is no data.
#[derive(Debug, Serialize)]
pub struct ChartBundle {
    pub movement_chart: Option<String>,
    pub price_chart: Option<String>,
}

const MOVEMENT_CHART_FILENAME: &str = "movement_chart.png";
const PRICE_CHART_FILENAME: &str = "price_chart.png";

/// PNG download, or the plain-text placeholder when the aggregate was empty.
fn png_or_placeholder(png: Option<Vec<u8>>, filename: &str) -> Response {
    match png {
        Some(bytes) => attachment("image/png", filename, bytes),
        None => (
            StatusCode::OK,
            [(CONTENT_TYPE, "text/plain; charset=utf-8")],
            NO_DATA_MESSAGE,
        )
            .into_response(),
    }
}

/// GET /api/v1/charts/movements
///
/// Donut chart of watch counts per movement type.
pub async fn movement_chart(State(state): State<AppState>) -> AppResult<Response> {
    let counts = StatsRepo::movement_counts(&state.pool).await?;
    let png = charts::movement_chart_png(&counts)?;
    Ok(png_or_placeholder(png, MOVEMENT_CHART_FILENAME))
}

/// GET /api/v1/charts/prices
///
/// Bar chart of the brands with the highest average watch price.
pub async fn price_chart(State(state): State<AppState>) -> AppResult<Response> {
    let rows = StatsRepo::top_brand_average_prices(&state.pool, TOP_BRANDS_BY_PRICE).await?;
    let png = charts::price_chart_png(&rows)?;
    Ok(png_or_placeholder(png, PRICE_CHART_FILENAME))
}

/// GET /api/v1/charts
pub async fn chart_bundle(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let (counts, prices) = tokio::try_join!(
        StatsRepo::movement_counts(&state.pool),
        StatsRepo::top_brand_average_prices(&state.pool, TOP_BRANDS_BY_PRICE),
    )?;

    let movement_chart = charts::movement_chart_png(&counts)?.map(|png| STANDARD.encode(png));
    let price_chart = charts::price_chart_png(&prices)?.map(|png| STANDARD.encode(png));

    Ok(Json(DataResponse {
        data: ChartBundle {
            movement_chart,
            price_chart,
        },
    }))
}
