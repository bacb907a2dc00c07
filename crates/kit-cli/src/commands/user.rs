use kit_db::service::KitService;

use crate::cli::{GlobalFlags, UserCommands};
use crate::output::output;

/// Handle `klg user`.
pub async fn handle(
    action: &UserCommands,
    svc: &KitService,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        UserCommands::Add { email, name, role } => {
            let user = svc.create_user(email, name, *role).await?;
            output(&user, flags.format)
        }
        UserCommands::List => {
            let users = svc.list_users(flags.limit).await?;
            output(&users, flags.format)
        }
    }
}
