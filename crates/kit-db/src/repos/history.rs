//! History ledger — read side of the append-only transition trail.
//!
//! Appends happen inside `transition_asset`'s transaction; this module
//! only reads, joining entries with the users they reference.

use kit_core::entities::HistoryEntry;
use kit_core::views::HistoryRecord;

use crate::error::StoreError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum, parse_optional_enum};
use crate::repos::asset::qualified_user_cols;
use crate::repos::user::{row_to_opt_user, row_to_user};
use crate::service::KitService;

const HISTORY_COLS: &str = "id, asset_id, previous_status, new_status, \
     previous_owner_id, new_owner_id, acting_user_id, notes, created_at";

/// Number of columns in `HISTORY_COLS`, for join offsets.
const HISTORY_COL_COUNT: i32 = 9;

/// Width of one user column group in the joined query.
const USER_COL_COUNT: i32 = 6;

fn row_to_entry(row: &libsql::Row) -> Result<HistoryEntry, StoreError> {
    Ok(HistoryEntry {
        id: row.get(0)?,
        asset_id: row.get(1)?,
        previous_status: parse_optional_enum(get_opt_string(row, 2)?.as_deref())?,
        new_status: parse_enum(&row.get::<String>(3)?)?,
        previous_owner_id: get_opt_string(row, 4)?,
        new_owner_id: get_opt_string(row, 5)?,
        acting_user_id: row.get(6)?,
        notes: get_opt_string(row, 7)?,
        created_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

fn row_to_record(row: &libsql::Row) -> Result<HistoryRecord, StoreError> {
    let previous_base = HISTORY_COL_COUNT;
    let new_base = previous_base + USER_COL_COUNT;
    let acting_base = new_base + USER_COL_COUNT;
    Ok(HistoryRecord {
        entry: row_to_entry(row)?,
        previous_owner: row_to_opt_user(row, previous_base)?,
        new_owner: row_to_opt_user(row, new_base)?,
        acting_user: row_to_user(row, acting_base)?,
    })
}

impl KitService {
    /// List history entries joined with the users they reference, newest
    /// first. Pass an asset ID to scope the trail to one asset.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn list_history(
        &self,
        asset_id: Option<&str>,
        limit: u32,
    ) -> Result<Vec<HistoryRecord>, StoreError> {
        let qualified_history = HISTORY_COLS
            .split(", ")
            .map(|col| format!("h.{col}"))
            .collect::<Vec<_>>()
            .join(", ");
        let scope = if asset_id.is_some() {
            "WHERE h.asset_id = ?1"
        } else {
            ""
        };
        let sql = format!(
            "SELECT {qualified_history}, {prev_cols}, {new_cols}, {acting_cols} \
             FROM asset_history h \
             LEFT JOIN users pu ON h.previous_owner_id = pu.id \
             LEFT JOIN users nu ON h.new_owner_id = nu.id \
             JOIN users au ON h.acting_user_id = au.id \
             {scope} \
             ORDER BY h.created_at DESC, h.rowid DESC LIMIT {limit}",
            prev_cols = qualified_user_cols("pu"),
            new_cols = qualified_user_cols("nu"),
            acting_cols = qualified_user_cols("au"),
        );

        let mut rows = match asset_id {
            Some(id) => self.db().conn().query(&sql, [id]).await?,
            None => self.db().conn().query(&sql, ()).await?,
        };

        let mut records = Vec::new();
        while let Some(row) = rows.next().await? {
            records.push(row_to_record(&row)?);
        }
        Ok(records)
    }

    /// The most recent history entry for an asset, if it has ever been
    /// transitioned. Used by consistency checks.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn latest_history(
        &self,
        asset_id: &str,
    ) -> Result<Option<HistoryEntry>, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {HISTORY_COLS} FROM asset_history WHERE asset_id = ?1 \
                     ORDER BY created_at DESC, rowid DESC LIMIT 1"
                ),
                [asset_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_entry(&row)?)),
            None => Ok(None),
        }
    }

    /// Count history entries for an asset.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn count_history(&self, asset_id: &str) -> Result<u64, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT COUNT(*) FROM asset_history WHERE asset_id = ?1",
                [asset_id],
            )
            .await?;
        let row = rows.next().await?.ok_or(StoreError::NoResult)?;
        #[allow(clippy::cast_sign_loss)]
        Ok(row.get::<i64>(0)? as u64)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use kit_core::entities::NewAsset;
    use kit_core::enums::{AssetCategory, AssetStatus, UserRole};
    use crate::test_support::helpers::{seed_admin, test_service};

    #[tokio::test]
    async fn empty_trail_for_fresh_asset() {
        let svc = test_service().await;
        let created = svc
            .create_asset(NewAsset::new("Fresh", AssetCategory::Laptop, "FR-H1"))
            .await
            .unwrap();

        assert_eq!(svc.latest_history(&created.asset.id).await.unwrap(), None);
        assert_eq!(
            svc.list_history(Some(&created.asset.id), 10)
                .await
                .unwrap()
                .len(),
            0
        );
    }

    #[tokio::test]
    async fn records_resolve_all_referenced_users() {
        let svc = test_service().await;
        let admin = seed_admin(&svc).await;
        let first = svc
            .create_user("p@example.com", "Prev", UserRole::User)
            .await
            .unwrap();
        let second = svc
            .create_user("n@example.com", "Next", UserRole::User)
            .await
            .unwrap();
        let created = svc
            .create_asset(NewAsset::new("Joined", AssetCategory::Laptop, "JN-1"))
            .await
            .unwrap();

        svc.transition_asset(
            &created.asset.id,
            AssetStatus::Allocated,
            Some(&first.id),
            &admin.id,
            None,
        )
        .await
        .unwrap();
        svc.transition_asset(
            &created.asset.id,
            AssetStatus::Allocated,
            Some(&second.id),
            &admin.id,
            None,
        )
        .await
        .unwrap();

        let records = svc.list_history(Some(&created.asset.id), 10).await.unwrap();
        assert_eq!(records.len(), 2);

        // Newest first: the reassignment.
        let latest = &records[0];
        assert_eq!(
            latest.previous_owner.as_ref().map(|u| u.email.as_str()),
            Some("p@example.com")
        );
        assert_eq!(
            latest.new_owner.as_ref().map(|u| u.email.as_str()),
            Some("n@example.com")
        );
        assert_eq!(latest.acting_user.id, admin.id);

        // The first allocation had no previous owner.
        let oldest = &records[1];
        assert_eq!(oldest.previous_owner, None);
        assert_eq!(
            oldest.new_owner.as_ref().map(|u| u.email.as_str()),
            Some("p@example.com")
        );
    }

    #[tokio::test]
    async fn unscoped_listing_spans_assets() {
        let svc = test_service().await;
        let admin = seed_admin(&svc).await;
        let a = svc
            .create_asset(NewAsset::new("A", AssetCategory::Mouse, "MA-1"))
            .await
            .unwrap();
        let b = svc
            .create_asset(NewAsset::new("B", AssetCategory::Mouse, "MB-1"))
            .await
            .unwrap();

        svc.transition_asset(&a.asset.id, AssetStatus::Available, None, &admin.id, None)
            .await
            .unwrap();
        svc.transition_asset(&b.asset.id, AssetStatus::Available, None, &admin.id, None)
            .await
            .unwrap();

        let all = svc.list_history(None, 10).await.unwrap();
        assert_eq!(all.len(), 2);

        let scoped = svc.list_history(Some(&a.asset.id), 10).await.unwrap();
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].entry.asset_id, a.asset.id);
    }
}
