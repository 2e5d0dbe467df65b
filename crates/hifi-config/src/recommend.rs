//! Recommendation engine defaults.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_range_min_pct() -> u32 {
    20
}

const fn default_range_max_pct() -> u32 {
    10
}

const fn default_per_category_limit() -> u32 {
    5
}

const fn default_max_per_brand() -> u32 {
    2
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecommendConfig {
    /// How far below a category allocation a component may be priced, in percent.
    #[serde(default = "default_range_min_pct")]
    pub range_min_pct: u32,

    /// How far above a category allocation a component may be priced, in percent.
    #[serde(default = "default_range_max_pct")]
    pub range_max_pct: u32,

    #[serde(default = "default_per_category_limit")]
    pub per_category_limit: u32,

    /// Maximum items from one brand within a category.
    #[serde(default = "default_max_per_brand")]
    pub max_per_brand: u32,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            range_min_pct: default_range_min_pct(),
            range_max_pct: default_range_max_pct(),
            per_category_limit: default_per_category_limit(),
            max_per_brand: default_max_per_brand(),
        }
    }
}

impl RecommendConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.range_min_pct >= 100 {
            return Err(ConfigError::invalid(
                "recommend.range_min_pct",
                format!("must be below 100, got {}", self.range_min_pct),
            ));
        }
        if self.range_max_pct > 100 {
            return Err(ConfigError::invalid(
                "recommend.range_max_pct",
                format!("must be at most 100, got {}", self.range_max_pct),
            ));
        }
        if self.per_category_limit == 0 {
            return Err(ConfigError::invalid(
                "recommend.per_category_limit",
                "must be at least 1",
            ));
        }
        if self.max_per_brand == 0 {
            return Err(ConfigError::invalid(
                "recommend.max_per_brand",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}
