use hifi_core::enums::{ListingSource, ListingStatus};
use hifi_db::repos::listings::ListingFilter;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_optional_enum;
use crate::context::AppContext;
use crate::output::output;

pub struct Params<'a> {
    pub component: Option<&'a str>,
    pub status: Option<&'a str>,
    pub source: Option<&'a str>,
    pub max_price: Option<f64>,
    pub bundles_only: bool,
}

pub async fn run(params: &Params<'_>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filter = ListingFilter {
        component_id: params.component.map(str::to_string),
        status: parse_optional_enum::<ListingStatus>(params.status, "status")?,
        source: parse_optional_enum::<ListingSource>(params.source, "source")?,
        max_price: params.max_price,
        bundles_only: params.bundles_only,
        limit: Some(effective_limit(flags.limit, ctx.config.general.default_limit)),
    };
    let listings = ctx.service.list_listings(&filter).await?;
    output(&listings, flags.format)
}
