//! Repository for the `complications` table and the `watch_complications`
//! association.

use std::collections::HashMap;

use horology_core::search::{like_pattern, search_terms};
use horology_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::complication::{
    Complication, ComplicationSummary, CreateComplication, UpdateComplication,
    WatchComplicationRow,
};

/// Column list for `complications` queries.
const COLUMNS: &str = "id, name, description, created_at, updated_at";

/// Select list for [`ComplicationSummary`], aliased against `complications c`.
const SUMMARY_COLUMNS: &str = "\
    c.id, c.name, c.description, \
    (SELECT COUNT(*) FROM watch_complications wc2 WHERE wc2.complication_id = c.id) AS watch_count";

/// Provides CRUD and listing for complications.
pub struct ComplicationRepo;

impl ComplicationRepo {
    /// List complications matching `search`, ordered by name.
    pub async fn list(
        pool: &PgPool,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ComplicationSummary>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {SUMMARY_COLUMNS} FROM complications c"
        ));
        push_search(&mut qb, search);
        qb.push(" ORDER BY c.name, c.id");
        qb.push(" LIMIT ").push_bind(limit);
        qb.push(" OFFSET ").push_bind(offset);

        qb.build_query_as::<ComplicationSummary>()
            .fetch_all(pool)
            .await
    }

    /// Count complications matching `search`.
    pub async fn count(pool: &PgPool, search: Option<&str>) -> Result<i64, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM complications c");
        push_search(&mut qb, search);
        qb.build_query_scalar::<i64>().fetch_one(pool).await
    }

    /// Find a complication with its watch count.
    pub async fn find_summary(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ComplicationSummary>, sqlx::Error> {
        let query = format!("SELECT {SUMMARY_COLUMNS} FROM complications c WHERE c.id = $1");
        sqlx::query_as::<_, ComplicationSummary>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Every complication, ordered by name. Used by the database export.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Complication>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM complications ORDER BY name, id");
        sqlx::query_as::<_, Complication>(&query)
            .fetch_all(pool)
            .await
    }

    /// Insert a new complication, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateComplication,
    ) -> Result<Complication, sqlx::Error> {
        let query = format!(
            "INSERT INTO complications (name, description) \
             VALUES ($1, COALESCE($2, '')) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Complication>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Update a complication. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateComplication,
    ) -> Result<Option<Complication>, sqlx::Error> {
        let query = format!(
            "UPDATE complications SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Complication>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a complication. Watch associations cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM complications WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Watch association helpers
    // -----------------------------------------------------------------------

    /// Complications of one watch, ordered by name.
    pub async fn list_for_watch(
        pool: &PgPool,
        watch_id: DbId,
    ) -> Result<Vec<ComplicationSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} \
             FROM complications c \
             JOIN watch_complications wc ON wc.complication_id = c.id \
             WHERE wc.watch_id = $1 \
             ORDER BY c.name, c.id"
        );
        sqlx::query_as::<_, ComplicationSummary>(&query)
            .bind(watch_id)
            .fetch_all(pool)
            .await
    }

    /// Complications of several watches in one query, grouped by watch id.
    ///
    /// Watches without complications are absent from the map.
    pub async fn list_for_watches(
        pool: &PgPool,
        watch_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<ComplicationSummary>>, sqlx::Error> {
        let query = format!(
            "SELECT wc.watch_id, {SUMMARY_COLUMNS} \
             FROM complications c \
             JOIN watch_complications wc ON wc.complication_id = c.id \
             WHERE wc.watch_id = ANY($1) \
             ORDER BY c.name, c.id"
        );
        let rows = sqlx::query_as::<_, WatchComplicationRow>(&query)
            .bind(watch_ids)
            .fetch_all(pool)
            .await?;

        let mut grouped: HashMap<DbId, Vec<ComplicationSummary>> = HashMap::new();
        for row in rows {
            grouped.entry(row.watch_id).or_default().push(row.complication);
        }
        Ok(grouped)
    }
}

/// Append the `WHERE` clause for a complication search on name.
fn push_search(qb: &mut QueryBuilder<'_, Postgres>, search: Option<&str>) {
    let Some(terms) = search.and_then(search_terms) else {
        return;
    };
    qb.push(" WHERE ");
    for (i, term) in terms.into_iter().enumerate() {
        if i > 0 {
            qb.push(" AND ");
        }
        qb.push("c.name ILIKE ")
            .push_bind(like_pattern(term))
            .push(" ESCAPE '\\'");
    }
}
