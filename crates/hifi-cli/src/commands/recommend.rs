use std::collections::HashMap;

use hifi_core::entities::{Component, UserGear};
use hifi_core::enums::{Category, SoundSignature};
use hifi_core::recommend::{RecommendationRequest, recommend};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RecommendArgs;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::{parse_enum, parse_optional_enum};
use crate::context::AppContext;
use crate::output::output;

/// Handle `hifi recommend`.
pub async fn handle(
    args: &RecommendArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let catalog = ctx.service.catalog().await?;
    let gear = ctx.service.list_gear(&ctx.user_id, false).await?;
    let request = build_request(args, ctx, flags, &gear, &catalog)?;

    tracing::debug!(
        budget = request.budget,
        categories = request.categories.len(),
        catalog = catalog.len(),
        "building recommendations"
    );
    let recommendations = recommend(&request, &catalog)?;
    output(&recommendations, flags.format)
}

fn build_request(
    args: &RecommendArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
    gear: &[UserGear],
    catalog: &[Component],
) -> anyhow::Result<RecommendationRequest> {
    let defaults = &ctx.config.recommend;

    let mut categories = Vec::new();
    for raw in &args.category {
        let category = parse_enum::<Category>(raw, "category")?;
        if !categories.contains(&category) {
            categories.push(category);
        }
    }
    if categories.is_empty() {
        categories.push(Category::Headphones);
    }

    let (owned, owns_amplification) = ownership(gear, catalog);

    Ok(RecommendationRequest {
        budget: args.budget,
        range_min_pct: args.range_min.unwrap_or_else(|| f64::from(defaults.range_min_pct)),
        range_max_pct: args.range_max.unwrap_or_else(|| f64::from(defaults.range_max_pct)),
        sound_signature: parse_optional_enum::<SoundSignature>(
            args.signature.as_deref(),
            "signature",
        )?,
        categories,
        owned_component_ids: if args.exclude_owned { owned } else { Vec::new() },
        owns_amplification,
        per_category_limit: usize::try_from(effective_limit(
            flags.limit,
            defaults.per_category_limit,
        ))?,
        max_per_brand: usize::try_from(defaults.max_per_brand)?,
    })
}

/// Catalog IDs in the user's active gear, and whether any of it amplifies.
fn ownership(gear: &[UserGear], catalog: &[Component]) -> (Vec<String>, bool) {
    let by_id: HashMap<&str, &Component> = catalog.iter().map(|c| (c.id.as_str(), c)).collect();

    let mut owned = Vec::new();
    let mut amplifies = false;
    for item in gear.iter().filter(|g| g.is_active) {
        let category = match item.component_id.as_deref() {
            Some(id) => {
                owned.push(id.to_string());
                by_id.get(id).map(|c| c.category)
            }
            None => item.custom_category,
        };
        amplifies |= matches!(category, Some(Category::Amp | Category::Combo));
    }
    (owned, amplifies)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use hifi_core::enums::{BudgetTier, Condition};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cli::OutputFormat;

    fn component(id: &str, category: Category) -> Component {
        Component {
            id: id.into(),
            brand: "Brand".into(),
            name: id.into(),
            category,
            price_new: Some(200.0),
            price_used_min: None,
            price_used_max: None,
            budget_tier: BudgetTier::Entry,
            sound_signature: None,
            impedance: None,
            sensitivity: None,
            needs_amp: false,
            driver_type: None,
            expert_grade: None,
            value_rating: None,
            why_recommended: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn gear(component_id: Option<&str>, custom: Option<Category>, active: bool) -> UserGear {
        UserGear {
            id: "gea-1".into(),
            user_id: "local".into(),
            component_id: component_id.map(str::to_string),
            custom_brand: custom.map(|_| "DIY".to_string()),
            custom_name: custom.map(|_| "Thing".to_string()),
            custom_category: custom,
            purchase_price: None,
            purchase_date: None,
            condition: Condition::Good,
            notes: None,
            is_active: active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn flags(limit: Option<u32>) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            limit,
            quiet: false,
            verbose: false,
            project: None,
            user: None,
        }
    }

    fn args() -> RecommendArgs {
        RecommendArgs {
            budget: 500.0,
            range_min: None,
            range_max: Some(25.0),
            signature: Some("warm".into()),
            category: vec!["headphones".into(), "amp".into(), "headphones".into()],
            exclude_owned: false,
        }
    }

    #[test]
    fn catalog_amp_counts_as_amplification() {
        let catalog = vec![component("cmp-amp", Category::Amp), component("cmp-hp", Category::Headphones)];
        let items = vec![gear(Some("cmp-amp"), None, true), gear(Some("cmp-hp"), None, true)];
        let (owned, amplifies) = ownership(&items, &catalog);
        assert_eq!(owned, vec!["cmp-amp", "cmp-hp"]);
        assert!(amplifies);
    }

    #[test]
    fn custom_combo_counts_and_removed_gear_does_not() {
        let catalog = vec![component("cmp-amp", Category::Amp)];
        let (_, amplifies) = ownership(&[gear(None, Some(Category::Combo), true)], &catalog);
        assert!(amplifies);

        let (owned, amplifies) = ownership(&[gear(Some("cmp-amp"), None, false)], &catalog);
        assert!(owned.is_empty());
        assert!(!amplifies);
    }

    #[tokio::test]
    async fn request_uses_config_defaults_and_dedupes_categories() {
        let ctx = AppContext::in_memory().await;
        let request = build_request(&args(), &ctx, &flags(None), &[], &[]).unwrap();

        assert_eq!(request.categories, vec![Category::Headphones, Category::Amp]);
        assert!((request.range_min_pct - 20.0).abs() < f64::EPSILON);
        assert!((request.range_max_pct - 25.0).abs() < f64::EPSILON);
        assert_eq!(request.sound_signature, Some(SoundSignature::Warm));
        assert_eq!(request.per_category_limit, 5);
        assert_eq!(request.max_per_brand, 2);
    }

    #[tokio::test]
    async fn owned_ids_only_sent_when_excluding() {
        let ctx = AppContext::in_memory().await;
        let catalog = vec![component("cmp-hp", Category::Headphones)];
        let items = vec![gear(Some("cmp-hp"), None, true)];

        let request = build_request(&args(), &ctx, &flags(Some(3)), &items, &catalog).unwrap();
        assert!(request.owned_component_ids.is_empty());
        assert_eq!(request.per_category_limit, 3);

        let mut excluding = args();
        excluding.exclude_owned = true;
        excluding.category.clear();
        let request = build_request(&excluding, &ctx, &flags(None), &items, &catalog).unwrap();
        assert_eq!(request.owned_component_ids, vec!["cmp-hp"]);
        assert_eq!(request.categories, vec![Category::Headphones]);
    }

    #[tokio::test]
    async fn bad_signature_is_rejected() {
        let ctx = AppContext::in_memory().await;
        let mut bad = args();
        bad.signature = Some("spicy".into());
        assert!(build_request(&bad, &ctx, &flags(None), &[], &[]).is_err());
    }
}
