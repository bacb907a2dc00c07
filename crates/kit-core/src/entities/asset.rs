use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::enums::{AssetCategory, AssetStatus};

/// A physical asset being tracked.
///
/// `owner_id` is conventionally set when `status` is `allocated`, but the
/// pairing is not enforced — callers may record any combination.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub category: AssetCategory,
    pub serial_number: String,
    pub model: Option<String>,
    pub brand: Option<String>,
    pub purchase_date: Option<DateTime<Utc>>,
    /// Fixed-point, two decimal places. Never a float.
    pub purchase_price: Option<Decimal>,
    pub status: AssetStatus,
    pub owner_id: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for registering a new asset.
///
/// Name, category, and serial number are required; everything else is
/// optional and `status` defaults to `unallocated` when unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAsset {
    pub name: String,
    pub category: AssetCategory,
    pub serial_number: String,
    pub model: Option<String>,
    pub brand: Option<String>,
    pub purchase_date: Option<DateTime<Utc>>,
    pub purchase_price: Option<Decimal>,
    pub status: Option<AssetStatus>,
    pub owner_id: Option<String>,
    pub notes: Option<String>,
}

impl NewAsset {
    /// Minimal constructor; remaining fields stay unset.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        category: AssetCategory,
        serial_number: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            serial_number: serial_number.into(),
            model: None,
            brand: None,
            purchase_date: None,
            purchase_price: None,
            status: None,
            owner_id: None,
            notes: None,
        }
    }
}
