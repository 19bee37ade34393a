//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod brand_repo;
pub mod complication_repo;
pub mod stats_repo;
pub mod watch_repo;

pub use brand_repo::BrandRepo;
pub use complication_repo::ComplicationRepo;
pub use stats_repo::StatsRepo;
pub use watch_repo::WatchRepo;
