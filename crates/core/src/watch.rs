//! Watch domain enums and field validation.
//!
//! Movement types and case materials are stored as short uppercase codes
//! (`AUTO`, `STEEL`, ...) and carry a human-readable label for list/detail
//! views and rendered documents.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Smallest accepted case diameter in millimetres.
pub const MIN_CASE_DIAMETER_MM: i32 = 20;

/// Maximum length of a watch reference number.
pub const MAX_REFERENCE_LEN: usize = 50;

/// Maximum length of a watch model name.
pub const MAX_MODEL_NAME_LEN: usize = 200;

// ---------------------------------------------------------------------------
// Movement type
// ---------------------------------------------------------------------------

/// Watch mechanism category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementType {
    #[serde(rename = "AUTO")]
    Automatic,
    #[serde(rename = "MANUAL")]
    Manual,
    #[serde(rename = "QUARTZ")]
    Quartz,
    #[serde(rename = "SOLAR")]
    Solar,
}

impl MovementType {
    /// Every movement type, in display order.
    pub const ALL: [MovementType; 4] = [
        MovementType::Automatic,
        MovementType::Manual,
        MovementType::Quartz,
        MovementType::Solar,
    ];

    /// Storage code written to the `movement_type` column.
    pub fn code(self) -> &'static str {
        match self {
            MovementType::Automatic => "AUTO",
            MovementType::Manual => "MANUAL",
            MovementType::Quartz => "QUARTZ",
            MovementType::Solar => "SOLAR",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            MovementType::Automatic => "Automatic",
            MovementType::Manual => "Manual",
            MovementType::Quartz => "Quartz",
            MovementType::Solar => "Solar",
        }
    }
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for MovementType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MovementType::ALL
            .into_iter()
            .find(|m| m.code() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown movement type '{s}'. Expected one of: AUTO, MANUAL, QUARTZ, SOLAR"
                ))
            })
    }
}

impl TryFrom<String> for MovementType {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Case material
// ---------------------------------------------------------------------------

/// Case material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CaseMaterial {
    Steel,
    Gold,
    Titanium,
    Ceramic,
    Platinum,
    Bronze,
}

impl CaseMaterial {
    /// Every material, in display order.
    pub const ALL: [CaseMaterial; 6] = [
        CaseMaterial::Steel,
        CaseMaterial::Gold,
        CaseMaterial::Titanium,
        CaseMaterial::Ceramic,
        CaseMaterial::Platinum,
        CaseMaterial::Bronze,
    ];

    /// Storage code written to the `case_material` column.
    pub fn code(self) -> &'static str {
        match self {
            CaseMaterial::Steel => "STEEL",
            CaseMaterial::Gold => "GOLD",
            CaseMaterial::Titanium => "TITANIUM",
            CaseMaterial::Ceramic => "CERAMIC",
            CaseMaterial::Platinum => "PLATINUM",
            CaseMaterial::Bronze => "BRONZE",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CaseMaterial::Steel => "Steel",
            CaseMaterial::Gold => "Gold",
            CaseMaterial::Titanium => "Titanium",
            CaseMaterial::Ceramic => "Ceramic",
            CaseMaterial::Platinum => "Platinum",
            CaseMaterial::Bronze => "Bronze",
        }
    }
}

impl fmt::Display for CaseMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CaseMaterial {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CaseMaterial::ALL
            .into_iter()
            .find(|m| m.code() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown case material '{s}'")))
    }
}

impl TryFrom<String> for CaseMaterial {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate the numeric watch fields that carry database CHECK constraints.
///
/// `None` means "not being changed" (partial updates) and is always accepted.
pub fn validate_watch_fields(
    price: Option<Decimal>,
    case_diameter: Option<i32>,
    water_resistance: Option<i32>,
) -> Result<(), CoreError> {
    if let Some(price) = price {
        if price < Decimal::ZERO {
            return Err(CoreError::Validation(format!(
                "price must be non-negative, got {price}"
            )));
        }
    }
    if let Some(diameter) = case_diameter {
        if diameter < MIN_CASE_DIAMETER_MM {
            return Err(CoreError::Validation(format!(
                "case_diameter must be at least {MIN_CASE_DIAMETER_MM} mm, got {diameter}"
            )));
        }
    }
    if let Some(depth) = water_resistance {
        if depth < 0 {
            return Err(CoreError::Validation(format!(
                "water_resistance must be non-negative, got {depth}"
            )));
        }
    }
    Ok(())
}

/// Reject empty (or whitespace-only) required text and text over `max_len` characters.
pub fn validate_text(value: &str, name: &str, max_len: usize) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{name} must not be empty")));
    }
    let len = value.chars().count();
    if len > max_len {
        return Err(CoreError::Validation(format!(
            "{name} must be at most {max_len} characters, got {len}"
        )));
    }
    Ok(())
}
