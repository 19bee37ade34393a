//! Brand entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use horology_core::types::{DbId, Timestamp};

use crate::models::empty_string_as_none;

/// A row from the `brands` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Brand {
    pub id: DbId,
    pub name: String,
    pub country: String,
    pub founded_year: i32,
    pub description: String,
    pub logo: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Brand as shown by the read API, with the number of watches it owns.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BrandSummary {
    pub id: DbId,
    pub name: String,
    pub country: String,
    pub founded_year: i32,
    pub logo: Option<String>,
    /// Filled by [`BrandSummary::with_media_url`].
    #[sqlx(skip)]
    pub logo_url: Option<String>,
    pub description: String,
    pub watch_count: i64,
}

impl BrandSummary {
    /// Resolve `logo_url` against the public media URL.
    pub fn with_media_url(mut self, media_url: &str) -> Self {
        self.logo_url = super::media_url(media_url, self.logo.as_deref());
        self
    }
}

/// DTO for creating a brand.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBrand {
    pub name: String,
    pub country: String,
    pub founded_year: i32,
    pub description: Option<String>,
    pub logo: Option<String>,
}

/// DTO for updating a brand. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBrand {
    pub name: Option<String>,
    pub country: Option<String>,
    pub founded_year: Option<i32>,
    pub description: Option<String>,
    pub logo: Option<String>,
}

/// Query parameters for `GET /api/v1/brands`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BrandListParams {
    /// Case-insensitive match on name or country.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub search: Option<String>,
    /// `name` or `founded_year`, optionally prefixed with `-`.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub ordering: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub offset: Option<i64>,
}
