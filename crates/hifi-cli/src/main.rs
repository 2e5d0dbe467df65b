use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

mod cli;
mod commands;
mod context;
mod error_body;
mod output;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();
    let format = cli.format;
    if let Err(error) = run(cli).await {
        error_body::report(&error, format);
        std::process::exit(1);
    }
}

async fn run(cli: cli::Cli) -> anyhow::Result<()> {
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();

    match &cli.command {
        cli::Commands::Init(args) => return commands::init::handle(args, &flags).await,
        cli::Commands::Schema(args) => return commands::schema::handle(args, &flags),
        _ => {}
    }

    let project_root = resolve_project_root(flags.project.as_deref())?;
    let config = load_config(&project_root)?;

    let ctx = context::AppContext::init(&project_root, config, &flags)
        .await
        .context("failed to initialize hifinder application context")?;

    commands::dispatch::dispatch(cli.command, &ctx, &flags).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("HIFINDER_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // stdout carries command output
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

/// Load `.env` from the project root, then the layered config.
fn load_config(project_root: &Path) -> anyhow::Result<hifi_config::HiConfig> {
    let dotenv = project_root.join(".env");
    if dotenv.is_file() {
        dotenvy::from_path(&dotenv)
            .with_context(|| format!("failed to read {}", dotenv.display()))?;
    }
    hifi_config::HiConfig::load_in(project_root).map_err(anyhow::Error::from)
}

fn resolve_project_root(project_override: Option<&str>) -> anyhow::Result<PathBuf> {
    if let Some(path) = project_override {
        let explicit = PathBuf::from(path);

        if explicit
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name == hifi_config::PROJECT_DIR)
        {
            return explicit
                .parent()
                .map(Path::to_path_buf)
                .context("invalid --project path: '.hifinder' directory has no parent");
        }

        if explicit.is_dir() {
            return Ok(explicit);
        }

        anyhow::bail!(
            "invalid --project '{}': directory does not exist",
            explicit.display()
        );
    }

    let start = std::env::current_dir().context("failed to read current directory")?;
    context::find_project_root(&start)
        .context("not a hifinder project (no .hifinder directory found). Run 'hifi init' first.")
}
