mod import;
mod list;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ComponentCommands;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

/// Handle `hifi component`.
pub async fn handle(
    action: &ComponentCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ComponentCommands::Get { id } => {
            let component = ctx.service.get_component(id).await?;
            output(&component, flags.format)
        }
        ComponentCommands::List {
            category,
            tier,
            signature,
            brand,
            min_price,
            max_price,
        } => {
            let params = list::Params {
                category: category.as_deref(),
                tier: tier.as_deref(),
                signature: signature.as_deref(),
                brand: brand.as_deref(),
                min_price: *min_price,
                max_price: *max_price,
            };
            list::run(&params, ctx, flags).await
        }
        ComponentCommands::Search { query } => {
            let limit = effective_limit(flags.limit, ctx.config.general.default_limit);
            let components = ctx.service.search_components(query, limit).await?;
            output(&components, flags.format)
        }
        ComponentCommands::Import { file } => import::run(file, ctx, flags).await,
    }
}
