mod add;
mod import;
mod list;
mod scrape;

use hifi_core::enums::ListingStatus;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ListingCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ExpireResponse {
    days: u32,
    expired: u64,
}

/// Handle `hifi listing`.
pub async fn handle(
    action: &ListingCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ListingCommands::Add {
            component,
            url,
            title,
            price,
            condition,
            source,
            location,
            seller,
        } => {
            let params = add::Params {
                component,
                url,
                title,
                price: *price,
                condition,
                source,
                location: location.as_deref(),
                seller: seller.as_deref(),
            };
            add::run(&params, ctx, flags).await
        }
        ListingCommands::Get { id } => output(&ctx.service.get_listing(id).await?, flags.format),
        ListingCommands::List {
            component,
            status,
            source,
            max_price,
            bundles,
        } => {
            let params = list::Params {
                component: component.as_deref(),
                status: status.as_deref(),
                source: source.as_deref(),
                max_price: *max_price,
                bundles_only: *bundles,
            };
            list::run(&params, ctx, flags).await
        }
        ListingCommands::Sold { id } => transition(id, ListingStatus::Sold, ctx, flags).await,
        ListingCommands::Remove { id } => transition(id, ListingStatus::Removed, ctx, flags).await,
        ListingCommands::Relist { id } => {
            transition(id, ListingStatus::Available, ctx, flags).await
        }
        ListingCommands::Expire { days } => {
            let days = days.unwrap_or(ctx.config.listings.stale_after_days);
            let expired = ctx.service.expire_stale_listings(days).await?;
            output(&ExpireResponse { days, expired }, flags.format)
        }
        ListingCommands::Import { file } => import::run(file, ctx, flags).await,
        ListingCommands::Scrape {
            source,
            query,
            subreddit,
            dry_run,
        } => {
            let params = scrape::Params {
                source,
                query: query.as_deref(),
                subreddit: subreddit.as_deref(),
                dry_run: *dry_run,
            };
            scrape::run(&params, ctx, flags).await
        }
        ListingCommands::Prices { component } => {
            output(&ctx.service.price_summary(component).await?, flags.format)
        }
    }
}

async fn transition(
    id: &str,
    status: ListingStatus,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let listing = ctx.service.transition_listing(id, status).await?;
    output(&listing, flags.format)
}
