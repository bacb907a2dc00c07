//! Asset repository — registration, plain field edits, deletion, reads.
//!
//! Plain edits through `update_asset` can change `status`/`owner_id`
//! WITHOUT writing a history entry. That bypass of the lifecycle engine
//! is a deliberate design choice carried over from the system's origin,
//! not an oversight; `transition_asset` is the audited path.

use chrono::Utc;
use rust_decimal::Decimal;

use kit_core::entities::{Asset, NewAsset};
use kit_core::enums::AssetStatus;
use kit_core::ids::PREFIX_ASSET;
use kit_core::views::AssetWithOwner;

use crate::error::{StoreError, map_unique_violation};
use crate::helpers::{
    get_opt_string, parse_datetime, parse_enum, parse_optional_datetime, parse_optional_decimal,
};
use crate::repos::user::{USER_COLS, row_to_opt_user};
use crate::service::KitService;
use crate::updates::asset::AssetUpdate;

pub(crate) const ASSET_COLS: &str = "id, name, category, serial_number, model, brand, \
     purchase_date, purchase_price, status, owner_id, notes, created_at, updated_at";

/// Number of columns in `ASSET_COLS`, for join offsets.
pub(crate) const ASSET_COL_COUNT: i32 = 13;

/// Qualified asset columns for joined queries.
const ASSET_COLS_QUALIFIED: &str = "a.id, a.name, a.category, a.serial_number, a.model, a.brand, \
     a.purchase_date, a.purchase_price, a.status, a.owner_id, a.notes, a.created_at, a.updated_at";

pub(crate) fn row_to_asset(row: &libsql::Row) -> Result<Asset, StoreError> {
    Ok(Asset {
        id: row.get(0)?,
        name: row.get(1)?,
        category: parse_enum(&row.get::<String>(2)?)?,
        serial_number: row.get(3)?,
        model: get_opt_string(row, 4)?,
        brand: get_opt_string(row, 5)?,
        purchase_date: parse_optional_datetime(get_opt_string(row, 6)?.as_deref())?,
        purchase_price: parse_optional_decimal(get_opt_string(row, 7)?.as_deref())?,
        status: parse_enum(&row.get::<String>(8)?)?,
        owner_id: get_opt_string(row, 9)?,
        notes: get_opt_string(row, 10)?,
        created_at: parse_datetime(&row.get::<String>(11)?)?,
        updated_at: parse_datetime(&row.get::<String>(12)?)?,
    })
}

fn row_to_asset_with_owner(row: &libsql::Row) -> Result<AssetWithOwner, StoreError> {
    Ok(AssetWithOwner {
        asset: row_to_asset(row)?,
        owner: row_to_opt_user(row, ASSET_COL_COUNT)?,
    })
}

/// Reject negative prices and normalise to two decimal places.
fn normalize_price(price: Option<Decimal>) -> Result<Option<Decimal>, StoreError> {
    match price {
        Some(p) if p.is_sign_negative() => Err(StoreError::InvalidState(format!(
            "purchase_price must be non-negative, got {p}"
        ))),
        Some(p) => Ok(Some(p.round_dp(2))),
        None => Ok(None),
    }
}

impl KitService {
    /// Register a new asset. Writes NO history entry — the trail starts
    /// at the first explicit transition, not at creation.
    ///
    /// # Errors
    ///
    /// Returns `NotFound("user")` when an initial owner is given but does
    /// not exist, `Conflict("serial_number")` on a duplicate serial, and
    /// `InvalidState` for a negative price.
    pub async fn create_asset(&self, new: NewAsset) -> Result<AssetWithOwner, StoreError> {
        if let Some(ref owner_id) = new.owner_id {
            self.require_user(owner_id).await?;
        }
        let price = normalize_price(new.purchase_price)?;

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_ASSET).await?;
        let status = new.status.unwrap_or(AssetStatus::Unallocated);

        self.db()
            .conn()
            .execute(
                "INSERT INTO assets (id, name, category, serial_number, model, brand, \
                 purchase_date, purchase_price, status, owner_id, notes, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                libsql::params![
                    id.as_str(),
                    new.name.as_str(),
                    new.category.as_str(),
                    new.serial_number.as_str(),
                    new.model.as_deref(),
                    new.brand.as_deref(),
                    new.purchase_date.map(|d| d.to_rfc3339()),
                    price.map(|p| p.to_string()),
                    status.as_str(),
                    new.owner_id.as_deref(),
                    new.notes.as_deref(),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await
            .map_err(|e| map_unique_violation(e, "serial_number"))?;

        tracing::info!(asset = %id, serial = %new.serial_number, %status, "asset registered");

        self.get_asset_with_owner(&id).await
    }

    /// Fetch an asset by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound("asset")` when the ID does not exist.
    pub async fn get_asset(&self, id: &str) -> Result<Asset, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {ASSET_COLS} FROM assets WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| StoreError::not_found("asset", id))?;
        row_to_asset(&row)
    }

    /// Fetch an asset joined with its (possibly null) owner.
    ///
    /// # Errors
    ///
    /// Returns `NotFound("asset")` when the ID does not exist.
    pub async fn get_asset_with_owner(&self, id: &str) -> Result<AssetWithOwner, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {ASSET_COLS_QUALIFIED}, {user_cols} \
                     FROM assets a LEFT JOIN users u ON a.owner_id = u.id \
                     WHERE a.id = ?1",
                    user_cols = qualified_user_cols("u")
                ),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| StoreError::not_found("asset", id))?;
        row_to_asset_with_owner(&row)
    }

    /// List assets with their owners, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn list_assets(&self, limit: u32) -> Result<Vec<AssetWithOwner>, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {ASSET_COLS_QUALIFIED}, {user_cols} \
                     FROM assets a LEFT JOIN users u ON a.owner_id = u.id \
                     ORDER BY a.created_at DESC, a.rowid DESC LIMIT ?1",
                    user_cols = qualified_user_cols("u")
                ),
                [i64::from(limit)],
            )
            .await?;

        let mut assets = Vec::new();
        while let Some(row) = rows.next().await? {
            assets.push(row_to_asset_with_owner(&row)?);
        }
        Ok(assets)
    }

    /// List the assets currently owned by one user.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn list_assets_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<AssetWithOwner>, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {ASSET_COLS_QUALIFIED}, {user_cols} \
                     FROM assets a LEFT JOIN users u ON a.owner_id = u.id \
                     WHERE a.owner_id = ?1 \
                     ORDER BY a.created_at DESC, a.rowid DESC",
                    user_cols = qualified_user_cols("u")
                ),
                [user_id],
            )
            .await?;

        let mut assets = Vec::new();
        while let Some(row) = rows.next().await? {
            assets.push(row_to_asset_with_owner(&row)?);
        }
        Ok(assets)
    }

    /// Apply a partial update to an asset's fields. Absent patch fields
    /// keep their prior values; `Some(None)` clears nullable columns.
    /// `updated_at` is refreshed unconditionally, even for an empty patch.
    ///
    /// Writes NO history entry, even when `status`/`owner_id` change.
    ///
    /// # Errors
    ///
    /// Returns `NotFound("asset")` when the asset does not exist,
    /// `NotFound("user")` when a non-null `owner_id` references nobody,
    /// `Conflict("serial_number")` on a duplicate serial, and
    /// `InvalidState` for a negative price.
    pub async fn update_asset(
        &self,
        asset_id: &str,
        update: AssetUpdate,
    ) -> Result<AssetWithOwner, StoreError> {
        // Existence first, so NotFound(asset) wins over owner validation.
        let _current = self.get_asset(asset_id).await?;
        if let Some(Some(ref owner_id)) = update.owner_id {
            self.require_user(owner_id).await?;
        }

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;

        if let Some(ref name) = update.name {
            sets.push(format!("name = ?{idx}"));
            params.push(name.clone().into());
            idx += 1;
        }
        if let Some(ref category) = update.category {
            sets.push(format!("category = ?{idx}"));
            params.push(category.as_str().into());
            idx += 1;
        }
        if let Some(ref serial_number) = update.serial_number {
            sets.push(format!("serial_number = ?{idx}"));
            params.push(serial_number.clone().into());
            idx += 1;
        }
        if let Some(ref model) = update.model {
            sets.push(format!("model = ?{idx}"));
            params.push(model.clone().map_or(libsql::Value::Null, Into::into));
            idx += 1;
        }
        if let Some(ref brand) = update.brand {
            sets.push(format!("brand = ?{idx}"));
            params.push(brand.clone().map_or(libsql::Value::Null, Into::into));
            idx += 1;
        }
        if let Some(purchase_date) = update.purchase_date {
            sets.push(format!("purchase_date = ?{idx}"));
            params.push(
                purchase_date.map_or(libsql::Value::Null, |d| d.to_rfc3339().into()),
            );
            idx += 1;
        }
        if let Some(purchase_price) = update.purchase_price {
            let price = normalize_price(purchase_price)?;
            sets.push(format!("purchase_price = ?{idx}"));
            params.push(price.map_or(libsql::Value::Null, |p| p.to_string().into()));
            idx += 1;
        }
        if let Some(ref status) = update.status {
            sets.push(format!("status = ?{idx}"));
            params.push(status.as_str().into());
            idx += 1;
        }
        if let Some(ref owner_id) = update.owner_id {
            sets.push(format!("owner_id = ?{idx}"));
            params.push(owner_id.clone().map_or(libsql::Value::Null, Into::into));
            idx += 1;
        }
        if let Some(ref notes) = update.notes {
            sets.push(format!("notes = ?{idx}"));
            params.push(notes.clone().map_or(libsql::Value::Null, Into::into));
            idx += 1;
        }

        let now = Utc::now();
        sets.push(format!("updated_at = ?{idx}"));
        params.push(now.to_rfc3339().into());
        idx += 1;

        params.push(asset_id.into());
        let sql = format!("UPDATE assets SET {} WHERE id = ?{idx}", sets.join(", "));
        self.db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await
            .map_err(|e| map_unique_violation(e, "serial_number"))?;

        tracing::debug!(asset = %asset_id, "asset fields updated");

        self.get_asset_with_owner(asset_id).await
    }

    /// Permanently remove an asset and its full history, atomically.
    ///
    /// Returns `true` when an asset row was removed, `false` when the ID
    /// never existed — a reported non-error condition. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the transaction fails; on failure nothing
    /// is removed.
    pub async fn delete_asset(&self, asset_id: &str) -> Result<bool, StoreError> {
        let tx = self.db().conn().transaction().await?;

        let history_removed = tx
            .execute(
                "DELETE FROM asset_history WHERE asset_id = ?1",
                [asset_id],
            )
            .await?;
        let assets_removed = tx
            .execute("DELETE FROM assets WHERE id = ?1", [asset_id])
            .await?;

        tx.commit().await?;

        let deleted = assets_removed > 0;
        if deleted {
            tracing::info!(asset = %asset_id, history_entries = history_removed, "asset deleted");
        }
        Ok(deleted)
    }
}

/// Render the user column list qualified with a table alias.
pub(crate) fn qualified_user_cols(alias: &str) -> String {
    USER_COLS
        .split(", ")
        .map(|col| format!("{alias}.{col}"))
        .collect::<Vec<_>>()
        .join(", ")
}
