use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `hifi` binary.
#[derive(Debug, Parser)]
#[command(
    name = "hifi",
    version,
    about = "HiFinder - audio gear recommendations and used-market tracking"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only in logs)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root path (defaults to auto-detect via .hifinder)
    #[arg(short, long, global = true)]
    pub project: Option<String>,

    /// User owning gear, stacks, wishlist and alerts (defaults to config)
    #[arg(short, long, global = true)]
    pub user: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            project: self.project.clone(),
            user: self.user.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::subcommands::{AlertCommands, ComponentCommands, ListingCommands, StackCommands};
    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "hifi", "--format", "table", "--limit", "10", "--verbose", "stats",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Stats));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["hifi", "stats", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["hifi", "--format", "xml", "stats"]).is_err());
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["hifi", "--project", "/tmp/demo", "--user", "sam", "stats"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.project.as_deref(), Some("/tmp/demo"));
        assert_eq!(flags.user.as_deref(), Some("sam"));
    }

    #[test]
    fn recommend_collects_repeated_categories() {
        let cli = Cli::try_parse_from([
            "hifi",
            "recommend",
            "--budget",
            "800",
            "--category",
            "headphones",
            "--category",
            "amp",
            "--signature",
            "warm",
            "--exclude-owned",
        ])
        .expect("cli should parse");

        let Commands::Recommend(args) = cli.command else {
            panic!("expected recommend");
        };
        assert!((args.budget - 800.0).abs() < f64::EPSILON);
        assert_eq!(args.category, vec!["headphones", "amp"]);
        assert_eq!(args.signature.as_deref(), Some("warm"));
        assert!(args.exclude_owned);
        assert!(args.range_min.is_none());
    }

    #[test]
    fn recommend_requires_budget() {
        assert!(Cli::try_parse_from(["hifi", "recommend"]).is_err());
    }

    #[test]
    fn component_import_takes_path() {
        let cli = Cli::try_parse_from(["hifi", "component", "import", "catalog.jsonl"])
            .expect("cli should parse");
        let Commands::Component { action } = cli.command else {
            panic!("expected component");
        };
        assert!(matches!(action, ComponentCommands::Import { file } if file == "catalog.jsonl"));
    }

    #[test]
    fn listing_scrape_defaults() {
        let cli = Cli::try_parse_from(["hifi", "listing", "scrape"]).expect("cli should parse");
        let Commands::Listing { action } = cli.command else {
            panic!("expected listing");
        };
        match action {
            ListingCommands::Scrape {
                source,
                query,
                dry_run,
                ..
            } => {
                assert_eq!(source, "all");
                assert!(query.is_none());
                assert!(!dry_run);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn alert_create_range() {
        let cli = Cli::try_parse_from([
            "hifi", "alert", "create", "cmp-1", "--type", "range", "--min", "150", "--max", "220",
        ])
        .expect("cli should parse");
        let Commands::Alert { action } = cli.command else {
            panic!("expected alert");
        };
        assert!(matches!(
            action,
            AlertCommands::Create { alert_type, min: Some(_), max: Some(_), .. } if alert_type == "range"
        ));
    }

    #[test]
    fn stack_add_with_position() {
        let cli = Cli::try_parse_from(["hifi", "stack", "add", "stk-1", "gea-1", "--position", "2"])
            .expect("cli should parse");
        let Commands::Stack { action } = cli.command else {
            panic!("expected stack");
        };
        assert!(matches!(
            action,
            StackCommands::Add { position: Some(2), .. }
        ));
    }
}
