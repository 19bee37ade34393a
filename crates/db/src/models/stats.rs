//! Aggregate rows feeding the chart endpoints.

use horology_core::watch::MovementType;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// Number of watches per movement type.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MovementCount {
    #[sqlx(try_from = "String")]
    pub movement_type: MovementType,
    pub count: i64,
}

/// Average catalog price of one brand's watches.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BrandAveragePrice {
    pub brand_name: String,
    pub average_price: Decimal,
}
