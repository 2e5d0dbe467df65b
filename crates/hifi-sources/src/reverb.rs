//! Reverb listings client (`/api/listings`, API version 3.0).

use chrono::{DateTime, Utc};
use hifi_core::enums::{Condition, ListingSource};
use hifi_core::listing_parse::detect_condition;

use crate::{ListingSourceClient, MAX_PAGE_SIZE, RawListing, error::SourceError, http::check_response};

const REVERB_API: &str = "https://api.reverb.com/api";

#[derive(serde::Deserialize)]
struct ReverbResponse {
    #[serde(default)]
    listings: Vec<ReverbListing>,
}

#[derive(serde::Deserialize)]
struct ReverbListing {
    id: u64,
    title: String,
    #[serde(default)]
    description: String,
    price: Option<ReverbMoney>,
    condition: Option<ReverbCondition>,
    created_at: Option<String>,
    shop_name: Option<String>,
    #[serde(rename = "_links")]
    links: Option<ReverbLinks>,
}

#[derive(serde::Deserialize)]
struct ReverbMoney {
    amount: String,
}

#[derive(serde::Deserialize)]
struct ReverbCondition {
    slug: Option<String>,
    display_name: Option<String>,
}

#[derive(serde::Deserialize)]
struct ReverbLinks {
    web: Option<ReverbHref>,
}

#[derive(serde::Deserialize)]
struct ReverbHref {
    href: String,
}

impl ListingSourceClient {
    /// Search Reverb listings matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the HTTP request fails, Reverb returns a
    /// non-success status, or the response cannot be parsed.
    pub async fn fetch_reverb(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<RawListing>, SourceError> {
        let limit = limit.clamp(1, MAX_PAGE_SIZE);
        let url = format!(
            "{REVERB_API}/listings?query={}&per_page={limit}",
            urlencoding::encode(query)
        );
        let mut req = self
            .http
            .get(&url)
            .header("Accept-Version", "3.0")
            .header(reqwest::header::ACCEPT, "application/hal+json");
        if let Some(token) = &self.reverb_token {
            req = req.bearer_auth(token);
        }
        let resp = check_response(req.send().await?).await?;
        let data: ReverbResponse = resp.json().await?;

        let listings: Vec<RawListing> = data.listings.into_iter().map(to_raw_listing).collect();
        tracing::debug!(query, kept = listings.len(), "fetched reverb listings");
        Ok(listings)
    }
}

/// Map a Reverb condition slug onto the local condition scale.
fn map_condition(slug: &str) -> Option<Condition> {
    match slug {
        "brand-new" | "b-stock" => Some(Condition::New),
        "mint" => Some(Condition::LikeNew),
        "excellent" => Some(Condition::Excellent),
        "very-good" => Some(Condition::VeryGood),
        "good" => Some(Condition::Good),
        "fair" | "poor" => Some(Condition::Fair),
        "non-functioning" => Some(Condition::Parts),
        _ => None,
    }
}

fn to_raw_listing(listing: ReverbListing) -> RawListing {
    let condition = listing
        .condition
        .as_ref()
        .and_then(|c| {
            c.slug
                .as_deref()
                .and_then(map_condition)
                .or_else(|| c.display_name.as_deref().map(detect_condition))
        })
        .unwrap_or_else(|| detect_condition(&listing.description));

    let price = listing
        .price
        .as_ref()
        .and_then(|p| p.amount.replace(',', "").parse::<f64>().ok())
        .filter(|p| *p > 0.0);

    let posted_at = listing
        .created_at
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map_or_else(
            || {
                tracing::warn!(id = listing.id, "reverb listing without a usable created_at");
                Utc::now()
            },
            |dt| dt.with_timezone(&Utc),
        );

    let url = listing.links.and_then(|l| l.web).map_or_else(
        || format!("https://reverb.com/item/{}", listing.id),
        |w| w.href,
    );

    RawListing {
        source: ListingSource::Reverb,
        external_id: listing.id.to_string(),
        url,
        item_text: listing.title.clone(),
        title: listing.title,
        body: listing.description,
        price,
        condition,
        location: None,
        seller: listing.shop_name,
        seller_feedback: None,
        posted_at,
    }
}
