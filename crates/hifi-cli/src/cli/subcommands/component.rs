use clap::Subcommand;

/// Component catalog commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ComponentCommands {
    /// Get a component by ID.
    Get { id: String },
    /// List components.
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        tier: Option<String>,
        #[arg(long)]
        signature: Option<String>,
        #[arg(long)]
        brand: Option<String>,
        #[arg(long)]
        min_price: Option<f64>,
        #[arg(long)]
        max_price: Option<f64>,
    },
    /// Full-text search over brand, name and description.
    Search { query: String },
    /// Import or refresh components from a JSONL file.
    Import { file: String },
}
