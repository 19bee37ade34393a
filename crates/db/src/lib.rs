//! PostgreSQL data access for the horology catalog.
//!
//! - [`models`] holds row structs, request DTOs and the list/detail views.
//! - [`repositories`] holds zero-sized repos with async query methods.
//!
//! The integration tests under `tests/` need a live PostgreSQL server and are
//! marked `#[ignore]`. Run them with:
//!
//! ```text
//! DATABASE_URL=postgres://localhost/horology cargo test -p horology-db -- --ignored
//! ```

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Cheap round-trip used by startup checks and `GET /health`.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations embedded from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
