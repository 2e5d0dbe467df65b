use crate::cli::GlobalFlags;
use crate::cli::subcommands::WishlistCommands;
use crate::commands::shared::ack::Deleted;
use crate::context::AppContext;
use crate::output::output;

/// Handle `hifi wishlist`.
pub async fn handle(
    action: &WishlistCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        WishlistCommands::Add {
            component,
            target,
            notes,
        } => {
            let item = ctx
                .service
                .add_to_wishlist(&ctx.user_id, component, *target, notes.as_deref())
                .await?;
            output(&item, flags.format)
        }
        WishlistCommands::List => {
            let entries = ctx.service.list_wishlist(&ctx.user_id).await?;
            output(&entries, flags.format)
        }
        WishlistCommands::Remove { id } => {
            ctx.service.remove_from_wishlist(id).await?;
            output(&Deleted::new(id), flags.format)
        }
    }
}

#[cfg(test)]
mod tests {
    use hifi_core::enums::Category;

    use super::*;
    use crate::commands::shared::fixtures::{json_flags, seed_component};

    #[tokio::test]
    async fn add_then_remove_round_trip() {
        let ctx = AppContext::in_memory().await;
        let component = seed_component(&ctx, "HiFiMAN", "Arya", Category::Headphones, 1299.0).await;
        let flags = json_flags();

        let add = WishlistCommands::Add {
            component: component.id.clone(),
            target: Some(900.0),
            notes: None,
        };
        handle(&add, &ctx, &flags).await.unwrap();

        let entries = ctx.service.list_wishlist(&ctx.user_id).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].below_target);

        let remove = WishlistCommands::Remove {
            id: entries[0].item.id.clone(),
        };
        handle(&remove, &ctx, &flags).await.unwrap();
        assert!(ctx.service.list_wishlist(&ctx.user_id).await.unwrap().is_empty());

        let missing = handle(&remove, &ctx, &flags).await;
        assert!(missing.is_err());
    }
}
