//! Repository for the `watches` table.
//!
//! Listing builds its `WHERE` clause dynamically from [`WatchFilter`] with
//! `QueryBuilder`, so every user value is a bind parameter and the only
//! spliced identifiers come from the `ordering` whitelist.

use std::collections::HashMap;

use horology_core::search::{like_pattern, search_terms, Ordering, SortDirection};
use horology_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::brand::BrandSummary;
use crate::models::export::WatchExportRow;
use crate::models::watch::{CreateWatch, UpdateWatch, Watch, WatchDetail, WatchFilter, WatchListRow};
use crate::repositories::ComplicationRepo;

/// Column list for `watches` queries.
const COLUMNS: &str = "\
    id, brand_id, model_name, reference_number, price, case_diameter, \
    movement_type, case_material, water_resistance, description, image, \
    serial_number, created_at, updated_at";

/// Select list for [`WatchListRow`]; requires `watches w JOIN brands b`.
const LIST_COLUMNS: &str = "\
    w.id, w.model_name, w.reference_number, w.price, w.case_diameter, \
    w.movement_type, w.case_material, w.water_resistance, w.image, \
    b.name AS brand_name, b.country AS brand_country, \
    (SELECT COUNT(*) FROM watch_complications wc WHERE wc.watch_id = w.id) AS complication_count, \
    w.created_at";

const LIST_FROM: &str = " FROM watches w JOIN brands b ON b.id = w.brand_id";

/// Select list for [`BrandSummary`] rows loaded alongside watch details.
const BRAND_SUMMARY_COLUMNS: &str = "\
    b.id, b.name, b.country, b.founded_year, b.logo, b.description, \
    (SELECT COUNT(*) FROM watches w WHERE w.brand_id = b.id) AS watch_count";

/// Unique constraint on `watches.serial_number`.
pub const SERIAL_CONSTRAINT: &str = "uq_watches_serial_number";

/// Fields accepted by the watch `ordering` parameter.
pub const WATCH_ORDERING_FIELDS: &[&str] = &["price", "case_diameter", "created_at", "model_name"];

/// Newest first.
pub const DEFAULT_WATCH_ORDERING: Ordering = Ordering {
    field: "created_at",
    direction: SortDirection::Desc,
};

/// Provides CRUD, filtered listing and batch detail loads for watches.
pub struct WatchRepo;

/// Whether `err` is a unique violation on [`SERIAL_CONSTRAINT`].
///
/// A serial that passed [`WatchRepo::serial_exists`] can still be taken by a
/// concurrent insert before ours commits.
pub fn is_serial_conflict(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505")
                && db_err.constraint() == Some(SERIAL_CONSTRAINT)
        }
        _ => false,
    }
}

impl WatchRepo {
    // -----------------------------------------------------------------------
    // Listing
    // -----------------------------------------------------------------------

    /// List watches matching `filter`, sorted by `ordering`.
    pub async fn list(
        pool: &PgPool,
        filter: &WatchFilter,
        ordering: Ordering,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<WatchListRow>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {LIST_COLUMNS}{LIST_FROM}"));
        push_filters(&mut qb, filter);
        qb.push(format!(
            " ORDER BY w.{} {}, w.id {}",
            ordering.field,
            ordering.direction.as_sql(),
            ordering.direction.as_sql()
        ));
        qb.push(" LIMIT ").push_bind(limit);
        qb.push(" OFFSET ").push_bind(offset);

        tracing::debug!(sql = qb.sql(), "Listing watches");
        qb.build_query_as::<WatchListRow>().fetch_all(pool).await
    }

    /// Count watches matching `filter`.
    pub async fn count(pool: &PgPool, filter: &WatchFilter) -> Result<i64, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT COUNT(*){LIST_FROM}"));
        push_filters(&mut qb, filter);
        qb.build_query_scalar::<i64>().fetch_one(pool).await
    }

    // -----------------------------------------------------------------------
    // Single-row and detail loads
    // -----------------------------------------------------------------------

    /// Find a watch row by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Watch>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM watches WHERE id = $1");
        sqlx::query_as::<_, Watch>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load a watch with its brand and complications.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<WatchDetail>, sqlx::Error> {
        let mut details = Self::find_details_by_ids(pool, &[id]).await?;
        Ok(details.pop())
    }

    /// Load several watches with their brands and complications.
    ///
    /// The result follows the order of `ids`; ids with no matching row are
    /// skipped, so callers compare lengths to detect missing watches.
    pub async fn find_details_by_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<WatchDetail>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = format!("SELECT {COLUMNS} FROM watches WHERE id = ANY($1)");
        let watches = sqlx::query_as::<_, Watch>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await?;

        let mut brand_ids: Vec<DbId> = watches.iter().map(|w| w.brand_id).collect();
        brand_ids.sort_unstable();
        brand_ids.dedup();

        let query = format!("SELECT {BRAND_SUMMARY_COLUMNS} FROM brands b WHERE b.id = ANY($1)");
        let brands: HashMap<DbId, BrandSummary> = sqlx::query_as::<_, BrandSummary>(&query)
            .bind(&brand_ids)
            .fetch_all(pool)
            .await?
            .into_iter()
            .map(|b| (b.id, b))
            .collect();

        let watch_ids: Vec<DbId> = watches.iter().map(|w| w.id).collect();
        let mut complications = ComplicationRepo::list_for_watches(pool, &watch_ids).await?;

        let mut by_id: HashMap<DbId, WatchDetail> = HashMap::with_capacity(watches.len());
        for watch in watches {
            // brand_id is a NOT NULL foreign key, so the brand row exists.
            let Some(brand) = brands.get(&watch.brand_id).cloned() else {
                continue;
            };
            let comps = complications.remove(&watch.id).unwrap_or_default();
            by_id.insert(watch.id, WatchDetail::assemble(watch, brand, comps));
        }

        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    /// Whether any watch already uses `serial_number`.
    pub async fn serial_exists(pool: &PgPool, serial_number: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM watches WHERE serial_number = $1)",
        )
        .bind(serial_number)
        .fetch_one(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Insert a watch and its complication set in one transaction.
    ///
    /// `serial_number` is the already-validated or freshly allocated serial;
    /// `input.serial_number` is ignored.
    pub async fn create(
        pool: &PgPool,
        input: &CreateWatch,
        serial_number: &str,
    ) -> Result<Watch, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO watches \
                (brand_id, model_name, reference_number, price, case_diameter, \
                 movement_type, case_material, water_resistance, description, \
                 image, serial_number) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        let watch = sqlx::query_as::<_, Watch>(&query)
            .bind(input.brand_id)
            .bind(&input.model_name)
            .bind(&input.reference_number)
            .bind(input.price)
            .bind(input.case_diameter)
            .bind(input.movement_type.code())
            .bind(input.case_material.code())
            .bind(input.water_resistance)
            .bind(&input.description)
            .bind(&input.image)
            .bind(serial_number)
            .fetch_one(&mut *tx)
            .await?;

        Self::set_complications_inner(&mut tx, watch.id, &input.complication_ids).await?;

        tx.commit().await?;
        Ok(watch)
    }

    /// Update a watch. Only non-`None` fields are applied.
    ///
    /// If `complication_ids` is `Some`, replaces the whole complication set.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateWatch,
    ) -> Result<Option<Watch>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE watches SET \
                brand_id = COALESCE($2, brand_id), \
                model_name = COALESCE($3, model_name), \
                reference_number = COALESCE($4, reference_number), \
                price = COALESCE($5, price), \
                case_diameter = COALESCE($6, case_diameter), \
                movement_type = COALESCE($7, movement_type), \
                case_material = COALESCE($8, case_material), \
                water_resistance = COALESCE($9, water_resistance), \
                description = COALESCE($10, description), \
                image = COALESCE($11, image) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let watch = sqlx::query_as::<_, Watch>(&query)
            .bind(id)
            .bind(input.brand_id)
            .bind(&input.model_name)
            .bind(&input.reference_number)
            .bind(input.price)
            .bind(input.case_diameter)
            .bind(input.movement_type.map(|m| m.code()))
            .bind(input.case_material.map(|m| m.code()))
            .bind(input.water_resistance)
            .bind(&input.description)
            .bind(&input.image)
            .fetch_optional(&mut *tx)
            .await?;

        if let Some(ref watch) = watch {
            if let Some(ref complication_ids) = input.complication_ids {
                Self::set_complications_inner(&mut tx, watch.id, complication_ids).await?;
            }
        }

        tx.commit().await?;
        Ok(watch)
    }

    /// Delete a watch. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM watches WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Export
    // -----------------------------------------------------------------------

    /// Every watch with its complication ids, ordered by id.
    pub async fn list_export_rows(pool: &PgPool) -> Result<Vec<WatchExportRow>, sqlx::Error> {
        sqlx::query_as::<_, WatchExportRow>(
            "SELECT w.id, w.brand_id, w.model_name, w.reference_number, w.price, \
                    w.case_diameter, w.movement_type, w.case_material, \
                    w.water_resistance, w.description, w.image, w.serial_number, \
                    ARRAY(SELECT wc.complication_id FROM watch_complications wc \
                          WHERE wc.watch_id = w.id ORDER BY wc.complication_id) \
                        AS complication_ids, \
                    w.created_at, w.updated_at \
             FROM watches w \
             ORDER BY w.id",
        )
        .fetch_all(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Replace complication associations within an existing transaction.
    ///
    /// Duplicate ids are ignored; unknown ids fail with a foreign key violation.
    async fn set_complications_inner(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        watch_id: DbId,
        complication_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM watch_complications WHERE watch_id = $1")
            .bind(watch_id)
            .execute(&mut **tx)
            .await?;

        if complication_ids.is_empty() {
            return Ok(());
        }

        sqlx::query(
            "INSERT INTO watch_complications (watch_id, complication_id) \
             SELECT $1, UNNEST($2::BIGINT[]) \
             ON CONFLICT DO NOTHING",
        )
        .bind(watch_id)
        .bind(complication_ids)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}

/// Append the `WHERE` clause for every filter present in `filter`.
fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &WatchFilter) {
    qb.push(" WHERE TRUE");

    if let Some(movement) = filter.movement_type {
        qb.push(" AND w.movement_type = ").push_bind(movement.code());
    }
    if let Some(material) = filter.case_material {
        qb.push(" AND w.case_material = ").push_bind(material.code());
    }
    if let Some(brand_id) = filter.brand {
        qb.push(" AND w.brand_id = ").push_bind(brand_id);
    }
    if let Some(country) = &filter.brand_country {
        qb.push(" AND b.country = ").push_bind(country.clone());
    }
    if let Some(country) = &filter.brand_country_contains {
        qb.push(" AND b.country ILIKE ")
            .push_bind(like_pattern(country))
            .push(" ESCAPE '\\'");
    }
    if let Some(complication_id) = filter.complications {
        qb.push(
            " AND EXISTS (SELECT 1 FROM watch_complications wcf \
             WHERE wcf.watch_id = w.id AND wcf.complication_id = ",
        )
        .push_bind(complication_id)
        .push(")");
    }

    push_range(qb, "w.case_diameter", filter.case_diameter, filter.case_diameter_lte, filter.case_diameter_gte);
    push_range(qb, "w.price", filter.price, filter.price_lte, filter.price_gte);
    push_range(
        qb,
        "w.water_resistance",
        filter.water_resistance,
        filter.water_resistance_lte,
        filter.water_resistance_gte,
    );

    if let Some(terms) = filter.search.as_deref().and_then(search_terms) {
        for term in terms {
            let pattern = like_pattern(term);
            qb.push(" AND (");
            for (i, column) in ["w.model_name", "w.reference_number", "b.name", "w.description"]
                .into_iter()
                .enumerate()
            {
                if i > 0 {
                    qb.push(" OR ");
                }
                qb.push(column)
                    .push(" ILIKE ")
                    .push_bind(pattern.clone())
                    .push(" ESCAPE '\\'");
            }
            qb.push(")");
        }
    }
}

/// Append exact / `<=` / `>=` conditions on one column.
fn push_range<T>(
    qb: &mut QueryBuilder<'_, Postgres>,
    column: &str,
    exact: Option<T>,
    lte: Option<T>,
    gte: Option<T>,
) where
    T: for<'q> sqlx::Encode<'q, Postgres> + sqlx::Type<Postgres> + Send + 'static,
{
    if let Some(value) = exact {
        qb.push(format!(" AND {column} = ")).push_bind(value);
    }
    if let Some(value) = lte {
        qb.push(format!(" AND {column} <= ")).push_bind(value);
    }
    if let Some(value) = gte {
        qb.push(format!(" AND {column} >= ")).push_bind(value);
    }
}
