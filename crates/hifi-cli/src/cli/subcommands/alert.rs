use clap::Subcommand;

/// Price alert commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AlertCommands {
    /// Create an alert.
    Create {
        component: String,
        /// below, exact or range.
        #[arg(long = "type", default_value = "below")]
        alert_type: String,
        #[arg(long)]
        target: Option<f64>,
        #[arg(long)]
        min: Option<f64>,
        #[arg(long)]
        max: Option<f64>,
        #[arg(long)]
        min_condition: Option<String>,
    },
    /// Get an alert by ID.
    Get { id: String },
    /// List alerts.
    List {
        /// Only active alerts.
        #[arg(long)]
        active: bool,
    },
    /// Update an alert.
    Update {
        id: String,
        #[arg(long = "type")]
        alert_type: Option<String>,
        #[arg(long)]
        target: Option<f64>,
        #[arg(long)]
        min: Option<f64>,
        #[arg(long)]
        max: Option<f64>,
        /// Minimum condition, or `any` to clear it.
        #[arg(long)]
        min_condition: Option<String>,
    },
    /// Re-enable an alert.
    Enable { id: String },
    /// Pause an alert.
    Disable { id: String },
    /// Delete an alert and its history.
    Delete { id: String },
    /// Evaluate active alerts against available listings.
    Check,
    /// Listings that fired an alert.
    History { id: String },
}
