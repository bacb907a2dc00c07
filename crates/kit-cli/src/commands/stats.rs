use kit_db::service::KitService;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `klg stats`.
pub async fn handle(svc: &KitService, flags: &GlobalFlags) -> anyhow::Result<()> {
    let stats = svc.dashboard_stats().await?;
    output(&stats, flags.format)
}
