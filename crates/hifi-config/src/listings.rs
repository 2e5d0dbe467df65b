//! Marketplace source settings.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_subreddit() -> String {
    "AVexchange".to_string()
}

fn default_user_agent() -> String {
    "hifinder/0.1".to_string()
}

const fn default_stale_after_days() -> u32 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListingsConfig {
    /// Subreddit scraped for `[WTS]` posts.
    #[serde(default = "default_subreddit")]
    pub reddit_subreddit: String,

    /// Reverb personal access token. Empty means anonymous requests.
    #[serde(default)]
    pub reverb_token: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Available listings older than this many days are expired.
    #[serde(default = "default_stale_after_days")]
    pub stale_after_days: u32,
}

impl Default for ListingsConfig {
    fn default() -> Self {
        Self {
            reddit_subreddit: default_subreddit(),
            reverb_token: String::new(),
            user_agent: default_user_agent(),
            stale_after_days: default_stale_after_days(),
        }
    }
}

impl ListingsConfig {
    #[must_use]
    pub fn reverb_token(&self) -> Option<&str> {
        let token = self.reverb_token.trim();
        (!token.is_empty()).then_some(token)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.reddit_subreddit.trim().is_empty() {
            return Err(ConfigError::invalid(
                "listings.reddit_subreddit",
                "must not be empty",
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::invalid("listings.user_agent", "must not be empty"));
        }
        if self.stale_after_days == 0 {
            return Err(ConfigError::invalid(
                "listings.stale_after_days",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}
