//! Read-side view types.
//!
//! These compose entities with the users they reference. They are built
//! by explicit join queries in kit-db; the write path never touches them.

use serde::{Deserialize, Serialize};

use crate::entities::{Asset, HistoryEntry, User};
use crate::enums::AssetCategory;

/// An asset joined with its current owner, if any.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssetWithOwner {
    #[serde(flatten)]
    pub asset: Asset,
    pub owner: Option<User>,
}

/// A history entry joined with every user it references.
///
/// `previous_owner` and `new_owner` resolve the optional owner columns;
/// `acting_user` is always present (the column is NOT NULL).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryRecord {
    #[serde(flatten)]
    pub entry: HistoryEntry,
    pub previous_owner: Option<User>,
    pub new_owner: Option<User>,
    pub acting_user: User,
}

/// Per-category asset count for the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: AssetCategory,
    pub count: u64,
}

/// Dashboard aggregates. Pure read-side counting, no business rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_assets: u64,
    pub available_assets: u64,
    pub allocated_assets: u64,
    pub under_repair_assets: u64,
    pub retired_assets: u64,
    pub assets_by_category: Vec<CategoryCount>,
}
