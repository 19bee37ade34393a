//! Complication entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use horology_core::types::{DbId, Timestamp};

use crate::models::empty_string_as_none;

/// A row from the `complications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Complication {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Complication as shown by the read API, with the number of watches using it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ComplicationSummary {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub watch_count: i64,
}

/// A complication tagged with the watch it was loaded for (batch detail loads).
#[derive(Debug, Clone, FromRow)]
pub struct WatchComplicationRow {
    pub watch_id: DbId,
    #[sqlx(flatten)]
    pub complication: ComplicationSummary,
}

/// DTO for creating a complication.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateComplication {
    pub name: String,
    pub description: Option<String>,
}

/// DTO for updating a complication. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateComplication {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Query parameters for `GET /api/v1/complications`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComplicationListParams {
    /// Case-insensitive match on name.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub offset: Option<i64>,
}
