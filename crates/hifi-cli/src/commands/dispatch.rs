use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Recommend(args) => commands::recommend::handle(&args, ctx, flags).await,
        Commands::Component { action } => commands::component::handle(&action, ctx, flags).await,
        Commands::Listing { action } => commands::listing::handle(&action, ctx, flags).await,
        Commands::Gear { action } => commands::gear::handle(&action, ctx, flags).await,
        Commands::Stack { action } => commands::stack::handle(&action, ctx, flags).await,
        Commands::Wishlist { action } => commands::wishlist::handle(&action, ctx, flags).await,
        Commands::Alert { action } => commands::alert::handle(&action, ctx, flags).await,
        Commands::Stats => commands::stats::handle(ctx, flags).await,
        Commands::Init(_) | Commands::Schema(_) => {
            anyhow::bail!("init and schema run before the project is opened")
        }
    }
}
