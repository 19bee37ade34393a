//! HTTP API for the horology catalog.
//!
//! Tests that need a live PostgreSQL server are marked `#[ignore]`. Run them
//! with `DATABASE_URL` set:
//!
//! ```text
//! DATABASE_URL=postgres://localhost/horology cargo test -p horology-api -- --ignored
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
