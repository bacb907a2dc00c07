//! Dashboard aggregates — pure read-side counting.

use kit_core::enums::{AssetCategory, AssetStatus};
use kit_core::views::{CategoryCount, DashboardStats};

use crate::error::StoreError;
use crate::helpers::parse_enum;
use crate::service::KitService;

impl KitService {
    /// Compute asset counts, total and grouped by status and category.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if a query fails.
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, StoreError> {
        let mut stats = DashboardStats::default();

        let mut rows = self
            .db()
            .conn()
            .query("SELECT status, COUNT(*) FROM assets GROUP BY status", ())
            .await?;
        while let Some(row) = rows.next().await? {
            let status: AssetStatus = parse_enum(&row.get::<String>(0)?)?;
            let count = count_from(&row)?;
            stats.total_assets += count;
            match status {
                AssetStatus::Available => stats.available_assets = count,
                AssetStatus::Allocated => stats.allocated_assets = count,
                AssetStatus::UnderRepair => stats.under_repair_assets = count,
                AssetStatus::Retired => stats.retired_assets = count,
                AssetStatus::Unallocated => {}
            }
        }

        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT category, COUNT(*) FROM assets GROUP BY category ORDER BY category",
                (),
            )
            .await?;
        while let Some(row) = rows.next().await? {
            let category: AssetCategory = parse_enum(&row.get::<String>(0)?)?;
            stats.assets_by_category.push(CategoryCount {
                category,
                count: count_from(&row)?,
            });
        }

        Ok(stats)
    }
}

fn count_from(row: &libsql::Row) -> Result<u64, StoreError> {
    #[allow(clippy::cast_sign_loss)]
    Ok(row.get::<i64>(1)? as u64)
}
