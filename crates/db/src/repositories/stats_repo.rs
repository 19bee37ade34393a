//! Aggregate queries feeding the chart endpoints.

use sqlx::PgPool;

use crate::models::stats::{BrandAveragePrice, MovementCount};

/// Number of brands shown on the average price chart.
pub const TOP_BRANDS_BY_PRICE: i64 = 5;

/// Read-only aggregates over the catalog.
pub struct StatsRepo;

impl StatsRepo {
    /// Watch counts per movement type. Types with no watches are absent.
    pub async fn movement_counts(pool: &PgPool) -> Result<Vec<MovementCount>, sqlx::Error> {
        sqlx::query_as::<_, MovementCount>(
            "SELECT movement_type, COUNT(*) AS count \
             FROM watches \
             GROUP BY movement_type \
             ORDER BY count DESC, movement_type",
        )
        .fetch_all(pool)
        .await
    }

    /// Brands with the highest average watch price, most expensive first.
    ///
    /// Brands without watches are excluded by the inner join.
    pub async fn top_brand_average_prices(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<BrandAveragePrice>, sqlx::Error> {
        sqlx::query_as::<_, BrandAveragePrice>(
            "SELECT b.name AS brand_name, ROUND(AVG(w.price), 2) AS average_price \
             FROM brands b \
             JOIN watches w ON w.brand_id = b.id \
             GROUP BY b.id, b.name \
             ORDER BY average_price DESC, b.name \
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
