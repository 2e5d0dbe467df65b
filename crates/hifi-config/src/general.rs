//! General application configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default result limit.
const fn default_limit() -> u32 {
    20
}

fn default_user_id() -> String {
    "local".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default result limit for list/search commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Owner of gear, stacks, wishlist items and alerts when `--user` is absent.
    #[serde(default = "default_user_id")]
    pub user_id: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            user_id: default_user_id(),
        }
    }
}

impl GeneralConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.default_limit == 0 {
            return Err(ConfigError::invalid("general.default_limit", "must be at least 1"));
        }
        if self.user_id.trim().is_empty() {
            return Err(ConfigError::invalid("general.user_id", "must not be empty"));
        }
        Ok(())
    }
}
