use hifi_core::enums::{BudgetTier, Category, SoundSignature};
use hifi_db::repos::components::ComponentFilter;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_optional_enum;
use crate::context::AppContext;
use crate::output::output;

pub struct Params<'a> {
    pub category: Option<&'a str>,
    pub tier: Option<&'a str>,
    pub signature: Option<&'a str>,
    pub brand: Option<&'a str>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

pub async fn run(params: &Params<'_>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filter = build_filter(params, effective_limit(flags.limit, ctx.config.general.default_limit))?;
    let components = ctx.service.list_components(&filter).await?;
    output(&components, flags.format)
}

fn build_filter(params: &Params<'_>, limit: u32) -> anyhow::Result<ComponentFilter> {
    if let (Some(min), Some(max)) = (params.min_price, params.max_price)
        && min > max
    {
        anyhow::bail!("--min-price ({min}) is above --max-price ({max})");
    }
    Ok(ComponentFilter {
        category: parse_optional_enum::<Category>(params.category, "category")?,
        budget_tier: parse_optional_enum::<BudgetTier>(params.tier, "tier")?,
        sound_signature: parse_optional_enum::<SoundSignature>(params.signature, "signature")?,
        brand: params.brand.map(str::to_string),
        min_price: params.min_price,
        max_price: params.max_price,
        limit: Some(limit),
    })
}
