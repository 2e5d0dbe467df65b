use hifi_core::entities::{Component, NewListing};
use hifi_core::enums::ListingSource;
use hifi_core::matcher::{is_bundle, match_components};
use hifi_core::responses::ScrapeReport;
use hifi_db::repos::UpsertOutcome;
use hifi_sources::{ListingSourceClient, RawListing};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

const DEFAULT_REVERB_QUERY: &str = "headphones";
const DEFAULT_FETCH_LIMIT: u32 = 50;

pub struct Params<'a> {
    pub source: &'a str,
    pub query: Option<&'a str>,
    pub subreddit: Option<&'a str>,
    pub dry_run: bool,
}

#[derive(Debug, Serialize)]
struct ScrapeResponse {
    dry_run: bool,
    report: ScrapeReport,
    /// Listings that would be written, shown only for dry runs.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    planned: Vec<NewListing>,
}

/// Matched listings ready to upsert, with the counters gathered so far.
#[derive(Debug)]
pub struct IngestPlan {
    pub listings: Vec<NewListing>,
    pub report: ScrapeReport,
}

pub async fn run(params: &Params<'_>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let settings = &ctx.config.listings;
    let client = ListingSourceClient::new(&settings.user_agent, settings.reverb_token())?;
    let subreddit = params.subreddit.unwrap_or(settings.reddit_subreddit.as_str());
    let query = params.query.unwrap_or(DEFAULT_REVERB_QUERY);
    let limit = usize::try_from(effective_limit(flags.limit, DEFAULT_FETCH_LIMIT))?;

    let raw = if params.source.eq_ignore_ascii_case("all") {
        client.fetch_all(subreddit, query, limit).await
    } else {
        let source = parse_enum::<ListingSource>(params.source, "source")?;
        let target = if source == ListingSource::Reddit { subreddit } else { query };
        client.fetch(source, target, limit).await?
    };

    let catalog = ctx.service.catalog().await?;
    let mut plan = plan_ingest(raw, &catalog);

    if params.dry_run {
        return output(
            &ScrapeResponse {
                dry_run: true,
                report: plan.report,
                planned: plan.listings,
            },
            flags.format,
        );
    }

    store(&plan.listings, ctx, &mut plan.report).await;
    output(
        &ScrapeResponse {
            dry_run: false,
            report: plan.report,
            planned: Vec::new(),
        },
        flags.format,
    )
}

/// Match raw posts against the catalog.
///
/// A post naming one component becomes one listing. A post naming several is
/// a bundle: one listing per component, URLs suffixed with `#component_id`,
/// sharing a group id, each priced at an even share of the asking total.
pub fn plan_ingest(raw: Vec<RawListing>, catalog: &[Component]) -> IngestPlan {
    let mut report = ScrapeReport {
        fetched: u32::try_from(raw.len()).unwrap_or(u32::MAX),
        ..ScrapeReport::default()
    };
    let mut listings = Vec::new();

    for post in raw {
        let text = if post.item_text.trim().is_empty() {
            &post.title
        } else {
            &post.item_text
        };
        let matches = match_components(text, catalog);
        if matches.is_empty() {
            tracing::debug!(url = %post.url, "no catalog match");
            report.unmatched += 1;
            continue;
        }
        let Some(total) = post.price else {
            tracing::warn!(url = %post.url, "matched listing has no price; skipped");
            report.skipped_no_price += 1;
            continue;
        };

        let base = NewListing {
            component_id: String::new(),
            source: post.source,
            external_id: Some(post.external_id.clone()),
            url: post.url.clone(),
            title: post.title.clone(),
            price: total,
            condition: post.condition,
            location: post.location.clone(),
            seller_username: post.seller.clone(),
            seller_feedback: post.seller_feedback,
            is_bundle: false,
            bundle_group_id: None,
            bundle_total_price: None,
            posted_at: Some(post.posted_at),
        };

        if is_bundle(&matches) {
            report.bundles += 1;
            let share = split_price(total, matches.len());
            for m in &matches {
                listings.push(NewListing {
                    component_id: m.component_id.clone(),
                    url: format!("{}#{}", post.url, m.component_id),
                    price: share,
                    is_bundle: true,
                    bundle_group_id: Some(format!("{}:{}", post.source, post.external_id)),
                    bundle_total_price: Some(total),
                    ..base.clone()
                });
            }
        } else {
            listings.push(NewListing {
                component_id: matches[0].component_id.clone(),
                ..base
            });
        }
    }

    IngestPlan { listings, report }
}

/// Even share of a bundle price, rounded to cents.
#[allow(clippy::cast_precision_loss)]
fn split_price(total: f64, parts: usize) -> f64 {
    let parts = parts.max(1) as f64;
    ((total / parts) * 100.0).round() / 100.0
}

async fn store(listings: &[NewListing], ctx: &AppContext, report: &mut ScrapeReport) {
    for listing in listings {
        match ctx.service.upsert_listing(listing).await {
            Ok((_, UpsertOutcome::Inserted)) => report.inserted += 1,
            Ok((_, UpsertOutcome::Updated)) => report.updated += 1,
            Ok((_, UpsertOutcome::Skipped)) => {}
            Err(error) => {
                tracing::warn!(url = %listing.url, %error, "failed to store scraped listing");
            }
        }
    }
}
