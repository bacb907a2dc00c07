use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::AssetStatus;

/// An append-only record of one status/ownership transition.
///
/// Entries are never mutated or removed while their asset exists;
/// deleting the asset removes its whole trail. For a given asset the
/// newest entry's `(new_status, new_owner_id)` always equals the asset's
/// current `(status, owner_id)` — the lifecycle engine writes both in
/// one transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: String,
    pub asset_id: String,
    pub previous_status: Option<AssetStatus>,
    pub new_status: AssetStatus,
    pub previous_owner_id: Option<String>,
    pub new_owner_id: Option<String>,
    pub acting_user_id: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
