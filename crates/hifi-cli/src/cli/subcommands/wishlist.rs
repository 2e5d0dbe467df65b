use clap::Subcommand;

/// Wishlist commands.
#[derive(Clone, Debug, Subcommand)]
pub enum WishlistCommands {
    /// Add a component to the wishlist.
    Add {
        component: String,
        #[arg(long)]
        target: Option<f64>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// List the wishlist with current lowest prices.
    List,
    /// Remove a wishlist item.
    Remove { id: String },
}
