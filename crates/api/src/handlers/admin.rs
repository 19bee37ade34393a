//! Handlers for the `/admin` resource: catalog CRUD and the database dump.
//!
//! All handlers require the admin bearer token via [`RequireAdmin`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use horology_core::error::CoreError;
use horology_core::serial::{insert_with_serial, validate_serial_number};
use horology_core::types::DbId;
use horology_core::watch::{
    validate_text, validate_watch_fields, MAX_MODEL_NAME_LEN, MAX_REFERENCE_LEN,
};
use horology_db::models::brand::{Brand, CreateBrand, UpdateBrand};
use horology_db::models::complication::{Complication, CreateComplication, UpdateComplication};
use horology_db::models::export::DatabaseDump;
use horology_db::models::watch::{CreateWatch, UpdateWatch, WatchDetail};
use horology_db::repositories::watch_repo::is_serial_conflict;
use horology_db::repositories::{BrandRepo, ComplicationRepo, WatchRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::attachment;
use crate::middleware::admin::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum length of brand, country and complication names.
const MAX_NAME_LEN: usize = 100;

const DUMP_FILENAME: &str = "database_export.json";

fn not_found(entity: &'static str, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity, id })
}

/// Validate a text field only when it is being changed.
fn validate_optional_text(value: Option<&str>, name: &str, max_len: usize) -> AppResult<()> {
    if let Some(value) = value {
        validate_text(value, name, max_len)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Brands
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/brands
pub async fn create_brand(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Json(input): Json<CreateBrand>,
) -> AppResult<(StatusCode, Json<DataResponse<Brand>>)> {
    validate_text(&input.name, "name", MAX_NAME_LEN)?;
    validate_text(&input.country, "country", MAX_NAME_LEN)?;

    let brand = BrandRepo::create(&state.pool, &input).await?;
    tracing::info!(brand_id = brand.id, name = %brand.name, "Brand created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: brand })))
}

/// PUT /api/v1/admin/brands/{id}
pub async fn update_brand(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBrand>,
) -> AppResult<Json<DataResponse<Brand>>> {
    validate_optional_text(input.name.as_deref(), "name", MAX_NAME_LEN)?;
    validate_optional_text(input.country.as_deref(), "country", MAX_NAME_LEN)?;

    let brand = BrandRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Brand", id))?;
    tracing::info!(brand_id = id, "Brand updated");
    Ok(Json(DataResponse { data: brand }))
}

/// DELETE /api/v1/admin/brands/{id}
///
/// Cascades to the brand's watches.
pub async fn delete_brand(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !BrandRepo::delete(&state.pool, id).await? {
        return Err(not_found("Brand", id));
    }
    tracing::info!(brand_id = id, "Brand deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Complications
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/complications
pub async fn create_complication(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Json(input): Json<CreateComplication>,
) -> AppResult<(StatusCode, Json<DataResponse<Complication>>)> {
    validate_text(&input.name, "name", MAX_NAME_LEN)?;

    let complication = ComplicationRepo::create(&state.pool, &input).await?;
    tracing::info!(
        complication_id = complication.id,
        name = %complication.name,
        "Complication created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: complication })))
}

/// PUT /api/v1/admin/complications/{id}
pub async fn update_complication(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateComplication>,
) -> AppResult<Json<DataResponse<Complication>>> {
    validate_optional_text(input.name.as_deref(), "name", MAX_NAME_LEN)?;

    let complication = ComplicationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Complication", id))?;
    tracing::info!(complication_id = id, "Complication updated");
    Ok(Json(DataResponse { data: complication }))
}

/// DELETE /api/v1/admin/complications/{id}
pub async fn delete_complication(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ComplicationRepo::delete(&state.pool, id).await? {
        return Err(not_found("Complication", id));
    }
    tracing::info!(complication_id = id, "Complication deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Watches
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/watches
///
/// Generates a unique serial number when none is supplied, retrying the insert
/// if a concurrent request claims it first. A supplied serial that is already
/// in use is a 409. Returns the full detail view with 201 Created.
pub async fn create_watch(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Json(input): Json<CreateWatch>,
) -> AppResult<(StatusCode, Json<DataResponse<WatchDetail>>)> {
    validate_text(&input.model_name, "model_name", MAX_MODEL_NAME_LEN)?;
    validate_text(&input.reference_number, "reference_number", MAX_REFERENCE_LEN)?;
    validate_watch_fields(
        Some(input.price),
        Some(input.case_diameter),
        Some(input.water_resistance),
    )?;

    let watch = match input.serial_number.as_deref() {
        Some(serial) => {
            validate_serial_number(serial)?;
            if WatchRepo::serial_exists(&state.pool, serial).await? {
                return Err(CoreError::Conflict(format!(
                    "serial_number '{serial}' is already in use"
                ))
                .into());
            }
            WatchRepo::create(&state.pool, &input, serial).await?
        }
        None => insert_with_serial(
            |candidate| {
                let pool = state.pool.clone();
                async move { WatchRepo::serial_exists(&pool, &candidate).await }
            },
            |serial| {
                let pool = state.pool.clone();
                let input = &input;
                async move { WatchRepo::create(&pool, input, &serial).await }
            },
            is_serial_conflict,
        )
        .await?
        .ok_or_else(|| AppError::InternalError("Could not allocate a serial number".into()))?,
    };

    tracing::info!(
        watch_id = watch.id,
        reference = %watch.reference_number,
        serial = %watch.serial_number,
        "Watch created"
    );

    let detail = WatchRepo::find_detail(&state.pool, watch.id)
        .await?
        .ok_or_else(|| not_found("Watch", watch.id))?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: detail.with_media_url(&state.config.media_url),
        }),
    ))
}

/// PUT /api/v1/admin/watches/{id}
///
/// Absent fields are left unchanged; `complication_ids` replaces the set.
pub async fn update_watch(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateWatch>,
) -> AppResult<Json<DataResponse<WatchDetail>>> {
    validate_optional_text(input.model_name.as_deref(), "model_name", MAX_MODEL_NAME_LEN)?;
    validate_optional_text(
        input.reference_number.as_deref(),
        "reference_number",
        MAX_REFERENCE_LEN,
    )?;
    validate_watch_fields(input.price, input.case_diameter, input.water_resistance)?;

    WatchRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Watch", id))?;
    tracing::info!(watch_id = id, "Watch updated");

    let detail = WatchRepo::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Watch", id))?;
    Ok(Json(DataResponse {
        data: detail.with_media_url(&state.config.media_url),
    }))
}

/// DELETE /api/v1/admin/watches/{id}
pub async fn delete_watch(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !WatchRepo::delete(&state.pool, id).await? {
        return Err(not_found("Watch", id));
    }
    tracing::info!(watch_id = id, "Watch deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Database dump
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/export/database
///
/// Every brand, complication and watch as one JSON download.
pub async fn export_database(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> AppResult<Response> {
    let (brands, complications, watches) = tokio::try_join!(
        BrandRepo::list_all(&state.pool),
        ComplicationRepo::list_all(&state.pool),
        WatchRepo::list_export_rows(&state.pool),
    )?;

    let dump = DatabaseDump {
        exported_at: chrono::Utc::now(),
        brands,
        complications,
        watches,
    };
    let bytes = serde_json::to_vec_pretty(&dump)
        .map_err(|e| AppError::InternalError(format!("Failed to serialize dump: {e}")))?;

    tracing::info!(
        brands = dump.brands.len(),
        complications = dump.complications.len(),
        watches = dump.watches.len(),
        bytes = bytes.len(),
        "Database export generated"
    );
    Ok(attachment("application/json", DUMP_FILENAME, bytes))
}
