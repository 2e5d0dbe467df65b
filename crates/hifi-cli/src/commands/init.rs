use std::path::{Path, PathBuf};

use anyhow::Context;
use hifi_config::{HiConfig, PROJECT_DIR};
use hifi_db::service::HiService;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InitArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct InitResponse {
    project_root: String,
    config_path: String,
    config_written: bool,
    database: String,
}

/// Handle `hifi init`.
pub async fn handle(args: &InitArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let root = match flags.project.as_deref() {
        Some(path) => PathBuf::from(path),
        None => std::env::current_dir().context("failed to read current directory")?,
    };
    let response = initialize(&root, args.force).await?;
    output(&response, flags.format)
}

async fn initialize(root: &Path, force: bool) -> anyhow::Result<InitResponse> {
    let project_dir = root.join(PROJECT_DIR);
    std::fs::create_dir_all(&project_dir)
        .with_context(|| format!("failed to create {}", project_dir.display()))?;

    let config_path = HiConfig::project_config_path(root);
    let config_written = force || !config_path.exists();
    if config_written {
        let template = toml::to_string_pretty(&HiConfig::default())
            .context("failed to render default config")?;
        std::fs::write(&config_path, template)
            .with_context(|| format!("failed to write {}", config_path.display()))?;
    }

    let config = HiConfig::load_in(root)?;
    let db_path = config.database.resolve(root);
    if !config.database.is_in_memory()
        && let Some(parent) = db_path.parent()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    // opening runs the migrations
    HiService::new_local(&db_path.to_string_lossy(), config.cache.stats_ttl())
        .await
        .context("failed to create hifinder database")?;

    tracing::info!(root = %root.display(), config_written, "project initialized");
    Ok(InitResponse {
        project_root: root.display().to_string(),
        config_path: config_path.display().to_string(),
        config_written,
        database: db_path.display().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_project_layout() {
        let temp = tempfile::tempdir().unwrap();
        let response = initialize(temp.path(), false).await.unwrap();

        assert!(response.config_written);
        assert!(temp.path().join(".hifinder/config.toml").is_file());
        assert!(temp.path().join(".hifinder/hifinder.db").is_file());

        let written = std::fs::read_to_string(temp.path().join(".hifinder/config.toml")).unwrap();
        assert!(written.contains("[recommend]"));
        assert!(written.contains("AVexchange"));
    }

    #[tokio::test]
    async fn keeps_existing_config_unless_forced() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(temp.path().join(".hifinder")).unwrap();
        std::fs::write(
            temp.path().join(".hifinder/config.toml"),
            "[general]\nuser_id = \"sam\"\n",
        )
        .unwrap();

        let response = initialize(temp.path(), false).await.unwrap();
        assert!(!response.config_written);
        let kept = std::fs::read_to_string(temp.path().join(".hifinder/config.toml")).unwrap();
        assert!(kept.contains("sam"));

        let response = initialize(temp.path(), true).await.unwrap();
        assert!(response.config_written);
        let reset = std::fs::read_to_string(temp.path().join(".hifinder/config.toml")).unwrap();
        assert!(reset.contains("user_id = \"local\""));
    }
}
