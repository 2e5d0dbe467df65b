//! In-memory cache settings.

use serde::{Deserialize, Serialize};
use std::time::Duration;

const fn default_stats_ttl_secs() -> u64 {
    300
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Lifetime of cached market statistics. Zero disables caching.
    #[serde(default = "default_stats_ttl_secs")]
    pub stats_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stats_ttl_secs: default_stats_ttl_secs(),
        }
    }
}

impl CacheConfig {
    #[must_use]
    pub const fn stats_ttl(&self) -> Duration {
        Duration::from_secs(self.stats_ttl_secs)
    }
}
