//! # hifi-sources
//!
//! HTTP clients for secondhand audio marketplaces.
//!
//! Fetches recent posts and normalises them into [`RawListing`]s:
//! - Reddit (`r/AVexchange` by default) through the public JSON listing
//! - Reverb through its v3 listings API
//!
//! Matching raw listings to catalog components happens in the caller.

pub mod reddit;
pub mod reverb;

mod error;
mod http;

pub use error::SourceError;

use chrono::{DateTime, Utc};
use hifi_core::enums::{Condition, ListingSource};
use serde::{Deserialize, Serialize};

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Largest page either marketplace serves in one request.
pub const MAX_PAGE_SIZE: usize = 100;

// ── Types ──────────────────────────────────────────────────────────

/// A marketplace post before it is matched against the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawListing {
    pub source: ListingSource,
    /// Marketplace-native id (`t3_...` on Reddit, numeric on Reverb).
    pub external_id: String,
    pub url: String,
    pub title: String,
    /// Text searched for components: the have-side of a Reddit title, or the
    /// full Reverb title.
    pub item_text: String,
    pub body: String,
    pub price: Option<f64>,
    pub condition: Condition,
    pub location: Option<String>,
    pub seller: Option<String>,
    /// Confirmed trades, from Reddit user flair.
    pub seller_feedback: Option<i64>,
    pub posted_at: DateTime<Utc>,
}

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for the supported listing sources.
pub struct ListingSourceClient {
    http: reqwest::Client,
    reverb_token: Option<String>,
}

impl ListingSourceClient {
    /// Build a client sending `user_agent` on every request.
    ///
    /// An empty `reverb_token` is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the TLS backend cannot be initialised.
    pub fn new(user_agent: &str, reverb_token: Option<&str>) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            reverb_token: reverb_token
                .filter(|t| !t.trim().is_empty())
                .map(str::to_string),
        })
    }

    /// Fetch from every source concurrently.
    ///
    /// A failing source is logged and contributes nothing; the others still
    /// return their listings. Results are ordered newest first.
    pub async fn fetch_all(
        &self,
        subreddit: &str,
        reverb_query: &str,
        limit: usize,
    ) -> Vec<RawListing> {
        let (reddit, reverb) = tokio::join!(
            self.fetch_reddit(subreddit, limit),
            self.fetch_reverb(reverb_query, limit),
        );

        let unwrap_or_log =
            |result: Result<Vec<RawListing>, SourceError>, source: &str| -> Vec<RawListing> {
                result.unwrap_or_else(|e| {
                    tracing::warn!(source, %e, "listing source fetch failed");
                    Vec::new()
                })
            };

        let mut listings = unwrap_or_log(reddit, "reddit");
        listings.extend(unwrap_or_log(reverb, "reverb"));
        listings.sort_by(|a, b| b.posted_at.cmp(&a.posted_at));
        listings
    }

    /// Fetch from one source by name (`reddit` or `reverb`).
    ///
    /// `query` is the subreddit for Reddit and the search text for Reverb.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the request fails, and
    /// [`SourceError::Parse`] for a source that cannot be scraped.
    pub async fn fetch(
        &self,
        source: ListingSource,
        query: &str,
        limit: usize,
    ) -> Result<Vec<RawListing>, SourceError> {
        match source {
            ListingSource::Reddit => self.fetch_reddit(query, limit).await,
            ListingSource::Reverb => self.fetch_reverb(query, limit).await,
            ListingSource::Manual => Err(SourceError::Parse(
                "manual listings are not fetched from a marketplace".to_string(),
            )),
        }
    }
}
