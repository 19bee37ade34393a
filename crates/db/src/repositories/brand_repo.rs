//! Repository for the `brands` table.

use horology_core::search::{like_pattern, search_terms, Ordering, SortDirection};
use horology_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::brand::{Brand, BrandSummary, CreateBrand, UpdateBrand};

/// Column list for `brands` queries.
const COLUMNS: &str = "id, name, country, founded_year, description, logo, created_at, updated_at";

/// Select list for [`BrandSummary`], aliased against `brands b`.
const SUMMARY_COLUMNS: &str = "\
    b.id, b.name, b.country, b.founded_year, b.logo, b.description, \
    (SELECT COUNT(*) FROM watches w WHERE w.brand_id = b.id) AS watch_count";

/// Fields accepted by the brand `ordering` parameter.
pub const BRAND_ORDERING_FIELDS: &[&str] = &["name", "founded_year"];

/// Alphabetical.
pub const DEFAULT_BRAND_ORDERING: Ordering = Ordering {
    field: "name",
    direction: SortDirection::Asc,
};

/// Provides CRUD and listing for brands.
pub struct BrandRepo;

impl BrandRepo {
    /// List brands matching `search`, sorted by `ordering`.
    pub async fn list(
        pool: &PgPool,
        search: Option<&str>,
        ordering: Ordering,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BrandSummary>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {SUMMARY_COLUMNS} FROM brands b"));
        push_search(&mut qb, search);
        qb.push(format!(
            " ORDER BY b.{} {}, b.id",
            ordering.field,
            ordering.direction.as_sql()
        ));
        qb.push(" LIMIT ").push_bind(limit);
        qb.push(" OFFSET ").push_bind(offset);

        qb.build_query_as::<BrandSummary>().fetch_all(pool).await
    }

    /// Count brands matching `search`.
    pub async fn count(pool: &PgPool, search: Option<&str>) -> Result<i64, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM brands b");
        push_search(&mut qb, search);
        qb.build_query_scalar::<i64>().fetch_one(pool).await
    }

    /// Find a brand with its watch count.
    pub async fn find_summary(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<BrandSummary>, sqlx::Error> {
        let query = format!("SELECT {SUMMARY_COLUMNS} FROM brands b WHERE b.id = $1");
        sqlx::query_as::<_, BrandSummary>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Every brand, ordered by name. Used by the database export.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Brand>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM brands ORDER BY name, id");
        sqlx::query_as::<_, Brand>(&query).fetch_all(pool).await
    }

    /// Insert a new brand, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateBrand) -> Result<Brand, sqlx::Error> {
        let query = format!(
            "INSERT INTO brands (name, country, founded_year, description, logo) \
             VALUES ($1, $2, $3, COALESCE($4, ''), $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Brand>(&query)
            .bind(&input.name)
            .bind(&input.country)
            .bind(input.founded_year)
            .bind(&input.description)
            .bind(&input.logo)
            .fetch_one(pool)
            .await
    }

    /// Update a brand. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBrand,
    ) -> Result<Option<Brand>, sqlx::Error> {
        let query = format!(
            "UPDATE brands SET \
                name = COALESCE($2, name), \
                country = COALESCE($3, country), \
                founded_year = COALESCE($4, founded_year), \
                description = COALESCE($5, description), \
                logo = COALESCE($6, logo) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Brand>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.country)
            .bind(input.founded_year)
            .bind(&input.description)
            .bind(&input.logo)
            .fetch_optional(pool)
            .await
    }

    /// Delete a brand and, through the cascade, all of its watches.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM brands WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Append the `WHERE` clause for a brand search: every term must match
/// name or country.
fn push_search(qb: &mut QueryBuilder<'_, Postgres>, search: Option<&str>) {
    let Some(terms) = search.and_then(search_terms) else {
        return;
    };
    qb.push(" WHERE ");
    for (i, term) in terms.into_iter().enumerate() {
        if i > 0 {
            qb.push(" AND ");
        }
        let pattern = like_pattern(term);
        qb.push("(b.name ILIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR b.country ILIKE ")
            .push_bind(pattern)
            .push(" ESCAPE '\\')");
    }
}
