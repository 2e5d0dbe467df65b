use hifi_core::entities::{NewListing, UsedListing};
use hifi_core::enums::{Condition, ListingSource};
use hifi_db::repos::UpsertOutcome;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

pub struct Params<'a> {
    pub component: &'a str,
    pub url: &'a str,
    pub title: &'a str,
    pub price: f64,
    pub condition: &'a str,
    pub source: &'a str,
    pub location: Option<&'a str>,
    pub seller: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct AddResponse {
    outcome: UpsertOutcome,
    listing: UsedListing,
}

pub async fn run(params: &Params<'_>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let input = to_new_listing(params)?;
    let (listing, outcome) = ctx.service.upsert_listing(&input).await?;
    output(&AddResponse { outcome, listing }, flags.format)
}

fn to_new_listing(params: &Params<'_>) -> anyhow::Result<NewListing> {
    Ok(NewListing {
        component_id: params.component.to_string(),
        source: parse_enum::<ListingSource>(params.source, "source")?,
        external_id: None,
        url: params.url.trim().to_string(),
        title: params.title.trim().to_string(),
        price: params.price,
        condition: parse_enum::<Condition>(params.condition, "condition")?,
        location: params.location.map(str::to_string),
        seller_username: params.seller.map(str::to_string),
        seller_feedback: None,
        is_bundle: false,
        bundle_group_id: None,
        bundle_total_price: None,
        posted_at: None,
    })
}
