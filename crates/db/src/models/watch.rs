//! Watch entity model, DTOs, filters and list/detail views.

use horology_core::types::{DbId, Timestamp};
use horology_core::watch::{CaseMaterial, MovementType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::brand::BrandSummary;
use crate::models::complication::ComplicationSummary;
use crate::models::{empty_string_as_none, media_url};

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `watches` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Watch {
    pub id: DbId,
    pub brand_id: DbId,
    pub model_name: String,
    pub reference_number: String,
    pub price: Decimal,
    pub case_diameter: i32,
    #[sqlx(try_from = "String")]
    pub movement_type: MovementType,
    #[sqlx(try_from = "String")]
    pub case_material: CaseMaterial,
    pub water_resistance: i32,
    pub description: String,
    pub image: Option<String>,
    pub serial_number: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Joined row backing the list view.
#[derive(Debug, Clone, FromRow)]
pub struct WatchListRow {
    pub id: DbId,
    pub model_name: String,
    pub reference_number: String,
    pub price: Decimal,
    pub case_diameter: i32,
    #[sqlx(try_from = "String")]
    pub movement_type: MovementType,
    #[sqlx(try_from = "String")]
    pub case_material: CaseMaterial,
    pub water_resistance: i32,
    pub image: Option<String>,
    pub brand_name: String,
    pub brand_country: String,
    pub complication_count: i64,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Views (response payloads)
// ---------------------------------------------------------------------------

/// Catalog list entry: summary fields only.
#[derive(Debug, Clone, Serialize)]
pub struct WatchSummary {
    pub id: DbId,
    pub model_name: String,
    pub reference_number: String,
    pub price: Decimal,
    pub case_diameter: i32,
    pub movement_type: MovementType,
    pub movement_display: &'static str,
    pub case_material: CaseMaterial,
    pub material_display: &'static str,
    pub water_resistance: i32,
    pub image: Option<String>,
    pub image_url: Option<String>,
    pub brand_name: String,
    pub brand_country: String,
    pub complication_count: i64,
    pub created_at: Timestamp,
}

impl WatchSummary {
    pub fn from_row(row: WatchListRow, media_base: &str) -> Self {
        let image_url = media_url(media_base, row.image.as_deref());
        Self {
            id: row.id,
            model_name: row.model_name,
            reference_number: row.reference_number,
            price: row.price,
            case_diameter: row.case_diameter,
            movement_type: row.movement_type,
            movement_display: row.movement_type.label(),
            case_material: row.case_material,
            material_display: row.case_material.label(),
            water_resistance: row.water_resistance,
            image: row.image,
            image_url,
            brand_name: row.brand_name,
            brand_country: row.brand_country,
            complication_count: row.complication_count,
            created_at: row.created_at,
        }
    }
}

/// Full watch record with nested brand and complications.
///
/// This is also the input of every report generator.
#[derive(Debug, Clone, Serialize)]
pub struct WatchDetail {
    pub id: DbId,
    pub model_name: String,
    pub reference_number: String,
    pub price: Decimal,
    pub case_diameter: i32,
    pub movement_type: MovementType,
    pub movement_display: &'static str,
    pub case_material: CaseMaterial,
    pub material_display: &'static str,
    pub water_resistance: i32,
    pub description: String,
    pub image: Option<String>,
    pub image_url: Option<String>,
    pub serial_number: String,
    /// Brand id.
    pub brand: DbId,
    pub brand_name: String,
    pub brand_country: String,
    pub brand_obj: BrandSummary,
    pub complications: Vec<ComplicationSummary>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl WatchDetail {
    pub fn assemble(
        watch: Watch,
        brand: BrandSummary,
        complications: Vec<ComplicationSummary>,
    ) -> Self {
        Self {
            id: watch.id,
            model_name: watch.model_name,
            reference_number: watch.reference_number,
            price: watch.price,
            case_diameter: watch.case_diameter,
            movement_type: watch.movement_type,
            movement_display: watch.movement_type.label(),
            case_material: watch.case_material,
            material_display: watch.case_material.label(),
            water_resistance: watch.water_resistance,
            description: watch.description,
            image: watch.image,
            image_url: None,
            serial_number: watch.serial_number,
            brand: watch.brand_id,
            brand_name: brand.name.clone(),
            brand_country: brand.country.clone(),
            brand_obj: brand,
            complications,
            created_at: watch.created_at,
            updated_at: watch.updated_at,
        }
    }

    /// Resolve `image_url` and the nested brand logo against the media URL.
    pub fn with_media_url(mut self, media_base: &str) -> Self {
        self.image_url = media_url(media_base, self.image.as_deref());
        self.brand_obj = self.brand_obj.with_media_url(media_base);
        self
    }

    /// Complication names in display order.
    pub fn complication_names(&self) -> Vec<&str> {
        self.complications.iter().map(|c| c.name.as_str()).collect()
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating a watch.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWatch {
    pub brand_id: DbId,
    pub model_name: String,
    pub reference_number: String,
    pub price: Decimal,
    pub case_diameter: i32,
    pub movement_type: MovementType,
    pub case_material: CaseMaterial,
    pub water_resistance: i32,
    #[serde(default)]
    pub description: String,
    pub image: Option<String>,
    /// Generated when absent.
    pub serial_number: Option<String>,
    #[serde(default)]
    pub complication_ids: Vec<DbId>,
}

/// DTO for updating a watch. All fields are optional.
///
/// `complication_ids`, when present, replaces the whole set.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateWatch {
    pub brand_id: Option<DbId>,
    pub model_name: Option<String>,
    pub reference_number: Option<String>,
    pub price: Option<Decimal>,
    pub case_diameter: Option<i32>,
    pub movement_type: Option<MovementType>,
    pub case_material: Option<CaseMaterial>,
    pub water_resistance: Option<i32>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub complication_ids: Option<Vec<DbId>>,
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Query parameters for `GET /api/v1/watches`.
///
/// Range filters use the `field__lte` / `field__gte` naming of the public API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WatchFilter {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub movement_type: Option<MovementType>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub case_material: Option<CaseMaterial>,
    /// Brand id.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub brand: Option<DbId>,
    #[serde(
        default,
        rename = "brand__country",
        deserialize_with = "empty_string_as_none"
    )]
    pub brand_country: Option<String>,
    #[serde(
        default,
        rename = "brand__country__icontains",
        deserialize_with = "empty_string_as_none"
    )]
    pub brand_country_contains: Option<String>,
    /// Complication id the watch must have.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub complications: Option<DbId>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub case_diameter: Option<i32>,
    #[serde(
        default,
        rename = "case_diameter__lte",
        deserialize_with = "empty_string_as_none"
    )]
    pub case_diameter_lte: Option<i32>,
    #[serde(
        default,
        rename = "case_diameter__gte",
        deserialize_with = "empty_string_as_none"
    )]
    pub case_diameter_gte: Option<i32>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub price: Option<Decimal>,
    #[serde(default, rename = "price__lte", deserialize_with = "empty_string_as_none")]
    pub price_lte: Option<Decimal>,
    #[serde(default, rename = "price__gte", deserialize_with = "empty_string_as_none")]
    pub price_gte: Option<Decimal>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub water_resistance: Option<i32>,
    #[serde(
        default,
        rename = "water_resistance__lte",
        deserialize_with = "empty_string_as_none"
    )]
    pub water_resistance_lte: Option<i32>,
    #[serde(
        default,
        rename = "water_resistance__gte",
        deserialize_with = "empty_string_as_none"
    )]
    pub water_resistance_gte: Option<i32>,

    /// Free text across model name, reference, brand name and description.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub search: Option<String>,
    /// `price`, `case_diameter`, `created_at` or `model_name`, optionally `-`-prefixed.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub ordering: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub offset: Option<i64>,
}
