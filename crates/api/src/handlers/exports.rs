//! Handlers for the PDF export endpoints under `/watches`.
//!
//! Every export takes `{ "watch_ids": [...] }`, loads the watches in request
//! order and returns one PDF as an attachment.

use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use horology_core::error::CoreError;
use horology_core::types::DbId;
use horology_db::models::watch::WatchDetail;
use horology_db::repositories::WatchRepo;
use horology_reports::{catalog, certificate, comparison, wishlist};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::attachment;
use crate::state::AppState;

const PDF: &str = "application/pdf";

/// Request body shared by every `POST /watches/export-*` endpoint.
#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub watch_ids: Vec<DbId>,
}

impl ExportRequest {
    /// Requested ids with duplicates removed, first occurrence wins.
    pub fn unique_ids(&self) -> AppResult<Vec<DbId>> {
        if self.watch_ids.is_empty() {
            return Err(AppError::BadRequest(
                "watch_ids must not be empty".to_string(),
            ));
        }
        let mut ids = Vec::with_capacity(self.watch_ids.len());
        for id in &self.watch_ids {
            if !ids.contains(id) {
                ids.push(*id);
            }
        }
        Ok(ids)
    }
}

/// Load the selected watches, failing with 404 on the first unknown id.
async fn load_selection(state: &AppState, ids: &[DbId]) -> AppResult<Vec<WatchDetail>> {
    let watches = WatchRepo::find_details_by_ids(&state.pool, ids).await?;
    if watches.len() != ids.len() {
        let missing = ids
            .iter()
            .copied()
            .find(|id| !watches.iter().any(|w| w.id == *id))
            .unwrap_or_default();
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Watch",
            id: missing,
        }));
    }
    Ok(watches)
}

fn pdf_response(kind: &'static str, filename: &str, watch_count: usize, bytes: Vec<u8>) -> Response {
    tracing::info!(
        kind,
        watch_count,
        bytes = bytes.len(),
        filename,
        "Export generated"
    );
    attachment(PDF, filename, bytes)
}

/// GET /api/v1/watches/{id}/certificate
pub async fn watch_certificate(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let watches = load_selection(&state, &[id]).await?;
    let bytes = certificate::render(&watches)?;
    Ok(pdf_response(
        "certificate",
        &certificate::filename(&watches),
        watches.len(),
        bytes,
    ))
}

/// POST /api/v1/watches/export-certificates
pub async fn export_certificates(
    State(state): State<AppState>,
    Json(input): Json<ExportRequest>,
) -> AppResult<Response> {
    let ids = input.unique_ids()?;
    let watches = load_selection(&state, &ids).await?;
    let bytes = certificate::render(&watches)?;
    Ok(pdf_response(
        "certificate",
        &certificate::filename(&watches),
        watches.len(),
        bytes,
    ))
}

/// POST /api/v1/watches/export-pdf
///
/// Technical-sheet catalog, one page per watch.
pub async fn export_catalog(
    State(state): State<AppState>,
    Json(input): Json<ExportRequest>,
) -> AppResult<Response> {
    let ids = input.unique_ids()?;
    let watches = load_selection(&state, &ids).await?;
    let bytes = catalog::render(&watches)?;
    Ok(pdf_response("catalog", catalog::FILENAME, watches.len(), bytes))
}

/// POST /api/v1/watches/export-wishlist
pub async fn export_wishlist(
    State(state): State<AppState>,
    Json(input): Json<ExportRequest>,
) -> AppResult<Response> {
    let ids = input.unique_ids()?;
    let watches = load_selection(&state, &ids).await?;
    let bytes = wishlist::render(&watches)?;
    Ok(pdf_response("wishlist", wishlist::FILENAME, watches.len(), bytes))
}

/// POST /api/v1/watches/export-comparison
///
/// The selection size is checked before touching the database.
pub async fn export_comparison(
    State(state): State<AppState>,
    Json(input): Json<ExportRequest>,
) -> AppResult<Response> {
    let ids = input.unique_ids()?;
    comparison::check_selection(ids.len())?;
    let watches = load_selection(&state, &ids).await?;
    let bytes = comparison::render(&watches)?;
    Ok(pdf_response(
        "comparison",
        comparison::FILENAME,
        watches.len(),
        bytes,
    ))
}
