//! Full database dump served by the admin export endpoint.

use horology_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use crate::models::brand::Brand;
use crate::models::complication::Complication;

/// A watch row plus the ids of its complications.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WatchExportRow {
    pub id: DbId,
    pub brand_id: DbId,
    pub model_name: String,
    pub reference_number: String,
    pub price: Decimal,
    pub case_diameter: i32,
    pub movement_type: String,
    pub case_material: String,
    pub water_resistance: i32,
    pub description: String,
    pub image: Option<String>,
    pub serial_number: String,
    pub complication_ids: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Every brand, complication and watch in one document.
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseDump {
    pub exported_at: Timestamp,
    pub brands: Vec<Brand>,
    pub complications: Vec<Complication>,
    pub watches: Vec<WatchExportRow>,
}
