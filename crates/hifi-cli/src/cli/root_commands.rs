use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    AlertCommands, ComponentCommands, GearCommands, ListingCommands, StackCommands,
    WishlistCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Initialize hifinder for a project directory.
    Init(InitArgs),
    /// Recommend components for a budget.
    Recommend(RecommendArgs),
    /// Component catalog.
    Component {
        #[command(subcommand)]
        action: ComponentCommands,
    },
    /// Used listings.
    Listing {
        #[command(subcommand)]
        action: ListingCommands,
    },
    /// Owned gear.
    Gear {
        #[command(subcommand)]
        action: GearCommands,
    },
    /// Gear stacks.
    Stack {
        #[command(subcommand)]
        action: StackCommands,
    },
    /// Wishlist.
    Wishlist {
        #[command(subcommand)]
        action: WishlistCommands,
    },
    /// Price alerts.
    Alert {
        #[command(subcommand)]
        action: AlertCommands,
    },
    /// Catalog and market counters.
    Stats,
    /// Dump JSON schema for a registered type.
    Schema(SchemaArgs),
}

/// Arguments for `hifi init`.
#[derive(Clone, Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config.toml with defaults.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `hifi recommend`.
#[derive(Clone, Debug, Args)]
pub struct RecommendArgs {
    /// Total budget in USD.
    #[arg(long)]
    pub budget: f64,
    /// Percent under each category share a pick may cost (default from config).
    #[arg(long)]
    pub range_min: Option<f64>,
    /// Percent over each category share a pick may cost (default from config).
    #[arg(long)]
    pub range_max: Option<f64>,
    /// Preferred sound signature: neutral, warm, bright, fun.
    #[arg(long)]
    pub signature: Option<String>,
    /// Categories to fill (repeatable). Defaults to headphones.
    #[arg(long)]
    pub category: Vec<String>,
    /// Skip components already in the user's gear.
    #[arg(long)]
    pub exclude_owned: bool,
}

/// Arguments for `hifi schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Type name, e.g. component, listing, alert. `list` shows all names.
    pub type_name: String,
}
