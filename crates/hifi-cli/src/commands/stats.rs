use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `hifi stats`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let stats = ctx.service.market_stats().await?;
    output(&stats, flags.format)
}
