use serde_json::json;

use kit_core::entities::NewAsset;
use kit_db::service::KitService;
use kit_db::updates::asset::{AssetUpdate, AssetUpdateBuilder};

use crate::cli::{AssetCommands, AssetEditArgs, GlobalFlags};
use crate::commands::parse_purchase_date;
use crate::output::output;

/// Handle `klg asset`.
pub async fn handle(
    action: &AssetCommands,
    svc: &KitService,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AssetCommands::Add(args) => {
            let new = NewAsset {
                name: args.name.clone(),
                category: args.category,
                serial_number: args.serial_number.clone(),
                model: args.model.clone(),
                brand: args.brand.clone(),
                purchase_date: args
                    .purchase_date
                    .as_deref()
                    .map(parse_purchase_date)
                    .transpose()?,
                purchase_price: args.price,
                status: args.status,
                owner_id: args.owner.clone(),
                notes: args.notes.clone(),
            };
            let created = svc.create_asset(new).await?;
            output(&created, flags.format)
        }
        AssetCommands::List => {
            let assets = svc.list_assets(flags.limit).await?;
            output(&assets, flags.format)
        }
        AssetCommands::Show { id } => {
            let asset = svc.get_asset_with_owner(id).await?;
            output(&asset, flags.format)
        }
        AssetCommands::Edit(args) => {
            let updated = svc.update_asset(&args.id, build_patch(args)?).await?;
            output(&updated, flags.format)
        }
        AssetCommands::Transition(args) => {
            let updated = svc
                .transition_asset(
                    &args.id,
                    args.status,
                    args.owner.as_deref(),
                    &args.acting_user,
                    args.notes.as_deref(),
                )
                .await?;
            output(&updated, flags.format)
        }
        AssetCommands::Delete { id } => {
            let deleted = svc.delete_asset(id).await?;
            output(&json!({ "id": id, "deleted": deleted }), flags.format)
        }
    }
}

/// Translate edit flags into a presence-tracking patch. A set flag maps
/// to `Some(value)`, a `--clear-*` flag to `Some(None)`, and silence to
/// "leave unchanged".
fn build_patch(args: &AssetEditArgs) -> anyhow::Result<AssetUpdate> {
    let mut builder = AssetUpdateBuilder::new();

    if let Some(ref name) = args.name {
        builder = builder.name(name);
    }
    if let Some(category) = args.category {
        builder = builder.category(category);
    }
    if let Some(ref serial_number) = args.serial_number {
        builder = builder.serial_number(serial_number);
    }
    if args.clear_model {
        builder = builder.model(None);
    } else if let Some(ref model) = args.model {
        builder = builder.model(Some(model.clone()));
    }
    if args.clear_brand {
        builder = builder.brand(None);
    } else if let Some(ref brand) = args.brand {
        builder = builder.brand(Some(brand.clone()));
    }
    if args.clear_purchase_date {
        builder = builder.purchase_date(None);
    } else if let Some(ref date) = args.purchase_date {
        builder = builder.purchase_date(Some(parse_purchase_date(date)?));
    }
    if args.clear_price {
        builder = builder.purchase_price(None);
    } else if let Some(price) = args.price {
        builder = builder.purchase_price(Some(price));
    }
    if let Some(status) = args.status {
        builder = builder.status(status);
    }
    if args.clear_owner {
        builder = builder.owner_id(None);
    } else if let Some(ref owner) = args.owner {
        builder = builder.owner_id(Some(owner.clone()));
    }
    if args.clear_notes {
        builder = builder.notes(None);
    } else if let Some(ref notes) = args.notes {
        builder = builder.notes(Some(notes.clone()));
    }

    Ok(builder.build())
}
