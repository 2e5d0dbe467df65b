use std::path::Path;

use anyhow::Context;
use hifi_config::HiConfig;
use hifi_db::service::HiService;

use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: HiService,
    pub config: HiConfig,
    /// Owner of user-scoped records for this invocation.
    pub user_id: String,
}

impl AppContext {
    /// Open the project database and resolve the acting user.
    pub async fn init(
        project_root: &Path,
        config: HiConfig,
        flags: &GlobalFlags,
    ) -> anyhow::Result<Self> {
        let db_path = config.database.resolve(project_root);
        if !config.database.is_in_memory()
            && let Some(parent) = db_path.parent()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let service = HiService::new_local(&db_path.to_string_lossy(), config.cache.stats_ttl())
            .await
            .context("failed to open hifinder database")?;

        let user_id = resolve_user(flags.user.as_deref(), &config);
        tracing::debug!(db = %db_path.display(), user_id, "application context ready");

        Ok(Self {
            service,
            config,
            user_id,
        })
    }

    #[cfg(test)]
    pub async fn in_memory() -> Self {
        let config = HiConfig::default();
        let service = HiService::new_local(":memory:", config.cache.stats_ttl())
            .await
            .expect("in-memory service should open");
        Self {
            service,
            user_id: config.general.user_id.clone(),
            config,
        }
    }
}

fn resolve_user(flag: Option<&str>, config: &HiConfig) -> String {
    flag.map(str::trim)
        .filter(|u| !u.is_empty())
        .unwrap_or(&config.general.user_id)
        .to_string()
}
