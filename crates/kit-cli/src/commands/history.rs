use kit_db::service::KitService;

use crate::cli::{GlobalFlags, HistoryArgs};
use crate::output::output;

/// Handle `klg history`.
pub async fn handle(
    args: &HistoryArgs,
    svc: &KitService,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let records = svc
        .list_history(args.asset.as_deref(), flags.limit)
        .await?;
    output(&records, flags.format)
}
