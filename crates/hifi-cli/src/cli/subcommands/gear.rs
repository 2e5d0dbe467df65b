use clap::Subcommand;

/// Owned gear commands.
#[derive(Clone, Debug, Subcommand)]
pub enum GearCommands {
    /// Add gear, either a catalog component or a custom item.
    Add {
        #[arg(long)]
        component: Option<String>,
        #[arg(long)]
        brand: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        /// Purchase date, YYYY-MM-DD.
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        condition: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Get gear by ID.
    Get { id: String },
    /// List gear.
    List {
        /// Include removed gear.
        #[arg(long)]
        all: bool,
    },
    /// Update gear.
    Update {
        id: String,
        #[arg(long)]
        brand: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        condition: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Remove gear from the collection.
    Remove { id: String },
    /// Purchase total and estimated value of the collection.
    Value,
}
