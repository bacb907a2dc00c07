//! The lifecycle engine — audited status/ownership transitions.
//!
//! `transition_asset` is the only operation that pairs an asset mutation
//! with a history append. Both writes run in one transaction: a failure
//! between them rolls everything back, so the asset's current
//! `(status, owner_id)` can never diverge from the newest history entry.

use chrono::Utc;

use kit_core::enums::AssetStatus;
use kit_core::ids::PREFIX_HISTORY;
use kit_core::views::AssetWithOwner;

use crate::error::StoreError;
use crate::service::KitService;

impl KitService {
    /// Execute a status/ownership transition on an asset.
    ///
    /// Preconditions, validated in order (first failure wins):
    /// 1. the asset exists,
    /// 2. the acting user exists,
    /// 3. the new owner, when given, exists.
    ///
    /// On success exactly one history entry is appended, capturing the
    /// asset's state before and after; on failure none is. Status/owner
    /// *combinations* are not validated — `allocated` with no owner is
    /// accepted. Callers are responsible for sensible pairings.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing asset, acting user, or new owner;
    /// storage errors roll back both writes.
    pub async fn transition_asset(
        &self,
        asset_id: &str,
        new_status: AssetStatus,
        new_owner_id: Option<&str>,
        acting_user_id: &str,
        notes: Option<&str>,
    ) -> Result<AssetWithOwner, StoreError> {
        let current = self.get_asset(asset_id).await?;
        self.require_user(acting_user_id).await?;
        if let Some(owner_id) = new_owner_id {
            self.require_user(owner_id).await?;
        }

        let entry_id = self.db().generate_id(PREFIX_HISTORY).await?;
        let now = Utc::now();

        let tx = self.db().conn().transaction().await?;

        tx.execute(
            "INSERT INTO asset_history (id, asset_id, previous_status, new_status, \
             previous_owner_id, new_owner_id, acting_user_id, notes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            libsql::params![
                entry_id.as_str(),
                asset_id,
                current.status.as_str(),
                new_status.as_str(),
                current.owner_id.as_deref(),
                new_owner_id,
                acting_user_id,
                notes,
                now.to_rfc3339()
            ],
        )
        .await?;

        tx.execute(
            "UPDATE assets SET status = ?1, owner_id = ?2, updated_at = ?3 WHERE id = ?4",
            libsql::params![
                new_status.as_str(),
                new_owner_id,
                now.to_rfc3339(),
                asset_id
            ],
        )
        .await?;

        tx.commit().await?;

        tracing::info!(
            asset = %asset_id,
            from = %current.status,
            to = %new_status,
            acting_user = %acting_user_id,
            "asset transitioned"
        );

        self.get_asset_with_owner(asset_id).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use kit_core::entities::NewAsset;
    use kit_core::enums::{AssetCategory, UserRole};
    use crate::test_support::helpers::{seed_admin, test_service};

    /// Scenario: allocate an available laptop to a user.
    #[tokio::test]
    async fn transition_allocates_and_records_history() {
        let svc = test_service().await;
        let admin = seed_admin(&svc).await;
        let user = svc
            .create_user("u1@example.com", "User One", UserRole::User)
            .await
            .unwrap();

        let mut new = NewAsset::new("Test Laptop", AssetCategory::Laptop, "LP001");
        new.status = Some(AssetStatus::Available);
        let created = svc.create_asset(new).await.unwrap();

        let updated = svc
            .transition_asset(
                &created.asset.id,
                AssetStatus::Allocated,
                Some(&user.id),
                &admin.id,
                Some("onboarding"),
            )
            .await
            .unwrap();

        assert_eq!(updated.asset.status, AssetStatus::Allocated);
        assert_eq!(updated.asset.owner_id.as_deref(), Some(user.id.as_str()));
        assert_eq!(updated.owner.as_ref().map(|u| u.id.as_str()), Some(user.id.as_str()));

        let entry = svc
            .latest_history(&created.asset.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(entry.previous_status, Some(AssetStatus::Available));
        assert_eq!(entry.new_status, AssetStatus::Allocated);
        assert_eq!(entry.previous_owner_id, None);
        assert_eq!(entry.new_owner_id.as_deref(), Some(user.id.as_str()));
        assert_eq!(entry.acting_user_id, admin.id);
        assert_eq!(entry.notes.as_deref(), Some("onboarding"));
        assert_eq!(svc.count_history(&created.asset.id).await.unwrap(), 1);
    }

    /// Scenario: reassignment captures the previous owner.
    #[tokio::test]
    async fn reassignment_captures_previous_owner() {
        let svc = test_service().await;
        let admin = seed_admin(&svc).await;
        let first = svc
            .create_user("first@example.com", "First", UserRole::User)
            .await
            .unwrap();
        let second = svc
            .create_user("second@example.com", "Second", UserRole::User)
            .await
            .unwrap();

        let created = svc
            .create_asset(NewAsset::new("Hand-me-down", AssetCategory::Laptop, "HM-1"))
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

        let entry = svc
            .latest_history(&created.asset.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(entry.previous_owner_id.as_deref(), Some(first.id.as_str()));
        assert_eq!(entry.new_owner_id.as_deref(), Some(second.id.as_str()));
    }

    /// Scenario: nonexistent new owner fails and leaves no trace.
    #[tokio::test]
    async fn missing_new_owner_leaves_state_untouched() {
        let svc = test_service().await;
        let admin = seed_admin(&svc).await;
        let mut new = NewAsset::new("Stable", AssetCategory::Monitor, "ST-1");
        new.status = Some(AssetStatus::Available);
        let created = svc.create_asset(new).await.unwrap();

        let result = svc
            .transition_asset(
                &created.asset.id,
                AssetStatus::Allocated,
                Some("usr-999"),
                &admin.id,
                None,
            )
            .await;
        assert!(matches!(
            result,
            Err(StoreError::NotFound { entity: "user", .. })
        ));

        let unchanged = svc.get_asset(&created.asset.id).await.unwrap();
        assert_eq!(unchanged.status, AssetStatus::Available);
        assert_eq!(unchanged.owner_id, None);
        assert_eq!(unchanged.updated_at, created.asset.updated_at);
        assert_eq!(svc.count_history(&created.asset.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn missing_asset_fails_first() {
        let svc = test_service().await;
        // Neither the asset nor the acting user exists; asset wins.
        let result = svc
            .transition_asset(
                "ast-missing",
                AssetStatus::Retired,
                None,
                "usr-also-missing",
                None,
            )
            .await;
        assert!(matches!(
            result,
            Err(StoreError::NotFound {
                entity: "asset",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn missing_acting_user_fails() {
        let svc = test_service().await;
        let created = svc
            .create_asset(NewAsset::new("Actorless", AssetCategory::Phone, "AC-1"))
            .await
            .unwrap();

        let result = svc
            .transition_asset(
                &created.asset.id,
                AssetStatus::Retired,
                None,
                "usr-phantom",
                None,
            )
            .await;
        assert!(matches!(
            result,
            Err(StoreError::NotFound { entity: "user", .. })
        ));
        assert_eq!(svc.count_history(&created.asset.id).await.unwrap(), 0);
    }

    /// Permissive by design: allocated with no owner is accepted.
    #[tokio::test]
    async fn allocated_without_owner_is_permitted() {
        let svc = test_service().await;
        let admin = seed_admin(&svc).await;
        let created = svc
            .create_asset(NewAsset::new("Floater", AssetCategory::Tablet, "FL-1"))
            .await
            .unwrap();

        let updated = svc
            .transition_asset(&created.asset.id, AssetStatus::Allocated, None, &admin.id, None)
            .await
            .unwrap();
        assert_eq!(updated.asset.status, AssetStatus::Allocated);
        assert_eq!(updated.asset.owner_id, None);
    }

    /// Consistency invariant: after any sequence of transitions, the
    /// asset's (status, owner_id) equals the newest history entry's
    /// (new_status, new_owner_id).
    #[tokio::test]
    async fn current_state_matches_latest_history_after_sequence() {
        let svc = test_service().await;
        let admin = seed_admin(&svc).await;
        let user = svc
            .create_user("seq@example.com", "Seq", UserRole::User)
            .await
            .unwrap();
        let created = svc
            .create_asset(NewAsset::new("Sequencer", AssetCategory::Laptop, "SQ-1"))
            .await
            .unwrap();

        let steps: &[(AssetStatus, Option<&str>)] = &[
            (AssetStatus::Available, None),
            (AssetStatus::Allocated, Some(user.id.as_str())),
            (AssetStatus::UnderRepair, None),
            (AssetStatus::Allocated, Some(user.id.as_str())),
            (AssetStatus::Retired, None),
        ];
        for (status, owner) in steps {
            svc.transition_asset(&created.asset.id, *status, *owner, &admin.id, None)
                .await
                .unwrap();

            let asset = svc.get_asset(&created.asset.id).await.unwrap();
            let entry = svc
                .latest_history(&created.asset.id)
                .await
                .unwrap()
                .unwrap();
            assert_eq!(asset.status, entry.new_status);
            assert_eq!(asset.owner_id, entry.new_owner_id);
        }
        assert_eq!(
            svc.count_history(&created.asset.id).await.unwrap(),
            steps.len() as u64
        );
    }

    #[tokio::test]
    async fn transitions_never_mutate_existing_entries() {
        let svc = test_service().await;
        let admin = seed_admin(&svc).await;
        let created = svc
            .create_asset(NewAsset::new("Immutable", AssetCategory::Other, "IM-1"))
            .await
            .unwrap();

        svc.transition_asset(&created.asset.id, AssetStatus::Available, None, &admin.id, None)
            .await
            .unwrap();
        let first = svc
            .latest_history(&created.asset.id)
            .await
            .unwrap()
            .unwrap();

        svc.transition_asset(&created.asset.id, AssetStatus::Retired, None, &admin.id, None)
            .await
            .unwrap();

        let records = svc.list_history(Some(&created.asset.id), 10).await.unwrap();
        assert_eq!(records.len(), 2);
        // Newest first; the older entry is byte-for-byte what it was.
        assert_eq!(records[1].entry, first);
    }

    /// Atomicity under forced failure: when the asset UPDATE aborts, the
    /// already-executed history INSERT must roll back with it.
    #[tokio::test]
    async fn failed_transition_rolls_back_history_append() {
        let svc = test_service().await;
        let admin = seed_admin(&svc).await;
        let mut new = NewAsset::new("Fragile", AssetCategory::Laptop, "FG-1");
        new.status = Some(AssetStatus::Available);
        let created = svc.create_asset(new).await.unwrap();

        // Inject a failure into the second write of the transaction.
        svc.db()
            .conn()
            .execute_batch(
                "CREATE TRIGGER abort_asset_update BEFORE UPDATE ON assets
                 BEGIN SELECT RAISE(ABORT, 'injected failure'); END;",
            )
            .await
            .unwrap();

        let result = svc
            .transition_asset(&created.asset.id, AssetStatus::Retired, None, &admin.id, None)
            .await;
        assert!(result.is_err(), "transition should abort");

        svc.db()
            .conn()
            .execute("DROP TRIGGER abort_asset_update", ())
            .await
            .unwrap();

        let asset = svc.get_asset(&created.asset.id).await.unwrap();
        assert_eq!(asset.status, AssetStatus::Available);
        assert_eq!(
            svc.count_history(&created.asset.id).await.unwrap(),
            0,
            "rolled-back transition must not leave a history entry"
        );
    }

    #[tokio::test]
    async fn transition_bumps_updated_at() {
        let svc = test_service().await;
        let admin = seed_admin(&svc).await;
        let created = svc
            .create_asset(NewAsset::new("Ticker", AssetCategory::Mouse, "TK-1"))
            .await
            .unwrap();

        let updated = svc
            .transition_asset(&created.asset.id, AssetStatus::Available, None, &admin.id, None)
            .await
            .unwrap();
        assert!(updated.asset.updated_at > created.asset.updated_at);
    }
}
