use clap::Subcommand;

/// Used listing commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ListingCommands {
    /// Record a listing by hand.
    Add {
        #[arg(long)]
        component: String,
        #[arg(long)]
        url: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        price: f64,
        #[arg(long, default_value = "good")]
        condition: String,
        #[arg(long, default_value = "manual")]
        source: String,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        seller: Option<String>,
    },
    /// Get a listing by ID.
    Get { id: String },
    /// List listings.
    List {
        #[arg(long)]
        component: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        source: Option<String>,
        #[arg(long)]
        max_price: Option<f64>,
        /// Only listings that are part of a bundle.
        #[arg(long)]
        bundles: bool,
    },
    /// Mark a listing sold.
    Sold { id: String },
    /// Mark a listing removed by its seller.
    Remove { id: String },
    /// Put an expired listing back on the market.
    Relist { id: String },
    /// Expire available listings older than the configured age.
    Expire {
        /// Age in days (defaults to listings.stale_after_days).
        #[arg(long)]
        days: Option<u32>,
    },
    /// Import or refresh listings from a JSONL file.
    Import { file: String },
    /// Fetch new posts from marketplaces and store the ones matching the catalog.
    Scrape {
        /// reddit, reverb or all.
        #[arg(long, default_value = "all")]
        source: String,
        /// Reverb search text (defaults to "headphones").
        #[arg(long)]
        query: Option<String>,
        /// Subreddit to read (defaults to listings.reddit_subreddit).
        #[arg(long)]
        subreddit: Option<String>,
        /// Match and report without writing.
        #[arg(long)]
        dry_run: bool,
    },
    /// Asking and sold price summary for a component.
    Prices { component: String },
}
