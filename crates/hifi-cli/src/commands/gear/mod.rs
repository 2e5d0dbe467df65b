mod add;
mod update;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::GearCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `hifi gear`.
pub async fn handle(
    action: &GearCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        GearCommands::Add {
            component,
            brand,
            name,
            category,
            price,
            date,
            condition,
            notes,
        } => {
            let params = add::Params {
                component: component.as_deref(),
                brand: brand.as_deref(),
                name: name.as_deref(),
                category: category.as_deref(),
                price: *price,
                date: date.as_deref(),
                condition: condition.as_deref(),
                notes: notes.as_deref(),
            };
            add::run(&params, ctx, flags).await
        }
        GearCommands::Get { id } => output(&ctx.service.get_gear(id).await?, flags.format),
        GearCommands::List { all } => {
            let gear = ctx.service.list_gear(&ctx.user_id, *all).await?;
            output(&gear, flags.format)
        }
        GearCommands::Update {
            id,
            brand,
            name,
            price,
            date,
            condition,
            notes,
        } => {
            let params = update::Params {
                id,
                brand: brand.as_deref(),
                name: name.as_deref(),
                price: *price,
                date: date.as_deref(),
                condition: condition.as_deref(),
                notes: notes.as_deref(),
            };
            update::run(&params, ctx, flags).await
        }
        GearCommands::Remove { id } => output(&ctx.service.remove_gear(id).await?, flags.format),
        GearCommands::Value => {
            let value = ctx.service.collection_value(&ctx.user_id).await?;
            output(&value, flags.format)
        }
    }
}
