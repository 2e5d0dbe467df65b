use clap::Subcommand;

/// Stack commands.
#[derive(Clone, Debug, Subcommand)]
pub enum StackCommands {
    /// Create a stack.
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// desktop, portable, studio, gaming or general.
        #[arg(long, default_value = "general")]
        purpose: String,
    },
    /// Get a stack with its gear.
    Get { id: String },
    /// List stacks.
    List,
    /// Update a stack.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        purpose: Option<String>,
    },
    /// Add gear to a stack, or move it.
    Add {
        stack: String,
        gear: String,
        #[arg(long)]
        position: Option<u32>,
    },
    /// Take gear out of a stack.
    Remove { stack: String, gear: String },
    /// Delete a stack. Gear is kept.
    Delete { id: String },
}
