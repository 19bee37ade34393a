//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//! - The list/detail views returned by the read API

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer};

pub mod brand;
pub mod complication;
pub mod export;
pub mod stats;
pub mod watch;

/// Join a stored relative media path onto the public media URL.
///
/// `None` stays `None`; the base may or may not end with `/`.
pub fn media_url(base: &str, path: Option<&str>) -> Option<String> {
    let path = path.filter(|p| !p.is_empty())?;
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    Some(format!("{base}/{path}"))
}

/// Deserialize an optional query parameter, treating `?field=` as absent.
///
/// Browser clients routinely send empty values for unset filters.
pub fn empty_string_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let opt = Option::<String>::deserialize(de)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(de::Error::custom),
    }
}
