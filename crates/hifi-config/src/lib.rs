//! # hifi-config
//!
//! Layered configuration loading for HiFinder using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`HIFINDER_*` prefix, `__` as separator)
//! 2. Project-level `.hifinder/config.toml`
//! 3. User-level `~/.config/hifinder/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `HIFINDER_RECOMMEND__RANGE_MIN_PCT` -> `recommend.range_min_pct`,
//! `HIFINDER_LISTINGS__REVERB_TOKEN` -> `listings.reverb_token`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use hifi_config::HiConfig;
//!
//! let config = HiConfig::load_with_dotenv().expect("config");
//! println!("database: {}", config.database.path);
//! ```

mod cache;
mod database;
mod error;
mod general;
mod listings;
mod recommend;

pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use listings::ListingsConfig;
pub use recommend::RecommendConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory holding project-local state.
pub const PROJECT_DIR: &str = ".hifinder";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HiConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub recommend: RecommendConfig,
    #[serde(default)]
    pub listings: ListingsConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl HiConfig {
    /// Load and validate configuration for the current directory.
    ///
    /// Does NOT call `dotenvy`, use [`HiConfig::load_with_dotenv`] for `.env` loading.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_in(Path::new("."))
    }

    /// Load and validate configuration for the project rooted at `root`.
    pub fn load_in(root: &Path) -> Result<Self, ConfigError> {
        let config: Self = Self::figment_in(root).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the current directory.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain for the current directory.
    pub fn figment() -> Figment {
        Self::figment_in(Path::new("."))
    }

    /// Build the figment provider chain for the project rooted at `root`.
    pub fn figment_in(root: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = Self::project_config_path(root);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("HIFINDER_").split("__"))
    }

    /// Reject values that would make later operations meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.recommend.validate()?;
        self.listings.validate()?;
        self.general.validate()?;
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn project_config_path(root: &Path) -> PathBuf {
        root.join(PROJECT_DIR).join("config.toml")
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("hifinder").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = HiConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.database.path, ".hifinder/hifinder.db");
        assert_eq!(config.cache.stats_ttl_secs, 300);
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: HiConfig = HiConfig::figment().extract()?;
            assert_eq!(config.general.default_limit, 20);
            assert_eq!(config.recommend.range_min_pct, 20);
            Ok(())
        });
    }

    #[test]
    fn empty_database_path_is_rejected() {
        let mut config = HiConfig::default();
        config.database.path = String::new();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
