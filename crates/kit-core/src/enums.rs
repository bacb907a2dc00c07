//! Status, category, and role enums for Kitlog entities.
//!
//! All enums use `kebab-case` serialization via `#[serde(rename_all =
//! "kebab-case")]` so the serde form matches the string stored in SQL
//! (notably `under-repair`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A string did not match any variant of the named enum.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind}: '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

// ---------------------------------------------------------------------------
// UserRole
// ---------------------------------------------------------------------------

/// Role of a user in the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UserRole {
    Admin,
    User,
}

impl UserRole {
    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            other => Err(ParseEnumError {
                kind: "user role",
                value: other.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// AssetStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of an asset.
///
/// Any status may follow any other; the lifecycle engine records the
/// transition rather than restricting it. Pairing `Allocated` with an
/// owner is conventional, not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetStatus {
    Unallocated,
    Available,
    Allocated,
    UnderRepair,
    Retired,
}

impl AssetStatus {
    /// All statuses, in display order (used by dashboard aggregation).
    pub const ALL: &'static [Self] = &[
        Self::Unallocated,
        Self::Available,
        Self::Allocated,
        Self::UnderRepair,
        Self::Retired,
    ];

    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unallocated => "unallocated",
            Self::Available => "available",
            Self::Allocated => "allocated",
            Self::UnderRepair => "under-repair",
            Self::Retired => "retired",
        }
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unallocated" => Ok(Self::Unallocated),
            "available" => Ok(Self::Available),
            "allocated" => Ok(Self::Allocated),
            "under-repair" => Ok(Self::UnderRepair),
            "retired" => Ok(Self::Retired),
            other => Err(ParseEnumError {
                kind: "asset status",
                value: other.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// AssetCategory
// ---------------------------------------------------------------------------

/// Hardware category of an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetCategory {
    Laptop,
    Keyboard,
    Monitor,
    Mouse,
    Tablet,
    Phone,
    Other,
}

impl AssetCategory {
    /// All categories, in display order.
    pub const ALL: &'static [Self] = &[
        Self::Laptop,
        Self::Keyboard,
        Self::Monitor,
        Self::Mouse,
        Self::Tablet,
        Self::Phone,
        Self::Other,
    ];

    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Laptop => "laptop",
            Self::Keyboard => "keyboard",
            Self::Monitor => "monitor",
            Self::Mouse => "mouse",
            Self::Tablet => "tablet",
            Self::Phone => "phone",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetCategory {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "laptop" => Ok(Self::Laptop),
            "keyboard" => Ok(Self::Keyboard),
            "monitor" => Ok(Self::Monitor),
            "mouse" => Ok(Self::Mouse),
            "tablet" => Ok(Self::Tablet),
            "phone" => Ok(Self::Phone),
            "other" => Ok(Self::Other),
            other => Err(ParseEnumError {
                kind: "asset category",
                value: other.to_string(),
            }),
        }
    }
}
