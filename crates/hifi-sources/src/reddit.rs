//! Reddit marketplace client (`/r/{subreddit}/new.json`).

use chrono::{DateTime, Utc};
use hifi_core::enums::ListingSource;
use hifi_core::listing_parse::{TradeType, detect_condition, extract_price, parse_reddit_title};

use crate::{ListingSourceClient, MAX_PAGE_SIZE, RawListing, error::SourceError, http::check_response};

const REDDIT_BASE: &str = "https://www.reddit.com";

#[derive(serde::Deserialize)]
struct RedditListing {
    data: RedditListingData,
}

#[derive(serde::Deserialize)]
struct RedditListingData {
    children: Vec<RedditChild>,
}

#[derive(serde::Deserialize)]
struct RedditChild {
    data: RedditPost,
}

#[derive(serde::Deserialize)]
struct RedditPost {
    name: String,
    title: String,
    #[serde(default)]
    selftext: String,
    permalink: String,
    author: Option<String>,
    created_utc: f64,
    link_flair_text: Option<String>,
    author_flair_text: Option<String>,
}

impl ListingSourceClient {
    /// Fetch the newest posts of `subreddit` and keep the sale posts.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the HTTP request fails, Reddit returns a
    /// non-success status, or the response cannot be parsed.
    pub async fn fetch_reddit(
        &self,
        subreddit: &str,
        limit: usize,
    ) -> Result<Vec<RawListing>, SourceError> {
        let limit = limit.clamp(1, MAX_PAGE_SIZE);
        let url = format!(
            "{REDDIT_BASE}/r/{}/new.json?limit={limit}&raw_json=1",
            urlencoding::encode(subreddit)
        );
        let resp = check_response(self.http.get(&url).send().await?).await?;
        let data: RedditListing = resp.json().await?;

        let fetched = data.data.children.len();
        let listings: Vec<RawListing> = data
            .data
            .children
            .into_iter()
            .filter_map(|child| to_raw_listing(child.data))
            .collect();
        tracing::debug!(subreddit, fetched, kept = listings.len(), "fetched reddit posts");
        Ok(listings)
    }
}

/// Closed or sold posts are flaired by the subreddit's bot.
fn is_closed(flair: Option<&str>) -> bool {
    flair.is_some_and(|f| {
        let f = f.to_ascii_lowercase();
        f.contains("closed") || f.contains("sold")
    })
}

/// Pull a trade count out of flair such as `Trades: 42` or `42 Trades`.
fn parse_trade_count(flair: Option<&str>) -> Option<i64> {
    let flair = flair?;
    if !flair.to_ascii_lowercase().contains("trade") {
        return None;
    }
    let digits: String = flair
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

#[allow(clippy::cast_possible_truncation)]
fn posted_at(created_utc: f64) -> DateTime<Utc> {
    DateTime::from_timestamp(created_utc as i64, 0).unwrap_or_else(Utc::now)
}

fn to_raw_listing(post: RedditPost) -> Option<RawListing> {
    let parsed = parse_reddit_title(&post.title);
    if parsed.trade_type != TradeType::Wts {
        return None;
    }
    if is_closed(post.link_flair_text.as_deref()) {
        tracing::debug!(id = %post.name, "skipping closed reddit post");
        return None;
    }

    let price = extract_price(&parsed.want)
        .or_else(|| extract_price(&post.title))
        .or_else(|| extract_price(&post.selftext));
    let condition = detect_condition(&format!("{} {}", parsed.have, post.selftext));

    Some(RawListing {
        source: ListingSource::Reddit,
        url: format!("{REDDIT_BASE}{}", post.permalink),
        external_id: post.name,
        item_text: parsed.have,
        title: post.title,
        body: post.selftext,
        price,
        condition,
        location: parsed.location,
        seller_feedback: parse_trade_count(post.author_flair_text.as_deref()),
        seller: post.author.filter(|a| a != "[deleted]"),
        posted_at: posted_at(post.created_utc),
    })
}
