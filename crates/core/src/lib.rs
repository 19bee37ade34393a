//! Domain types and pure helpers for the horology catalog.
//!
//! Nothing in this crate performs I/O; the database, report and API crates
//! all build on it.

pub mod error;
pub mod search;
pub mod serial;
pub mod types;
pub mod watch;
