use hifi_core::entities::{
    AlertTrigger, Component, NewAlert, NewComponent, NewGear, NewListing, PriceAlert, UsedListing,
    UserGear, UserStack, WishlistItem,
};
use hifi_core::errors::CoreError;
use hifi_core::recommend::{RecommendationRequest, Recommendations};
use hifi_core::responses::{
    AlertCheckReport, CollectionValue, ImportReport, MarketStats, PriceSummary, ScrapeReport,
    StackDetail, WishlistEntry,
};
use schemars::schema_for;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Names accepted by `hifi schema`.
pub const SCHEMA_NAMES: &[&str] = &[
    "component",
    "new_component",
    "listing",
    "new_listing",
    "gear",
    "new_gear",
    "stack",
    "stack_detail",
    "wishlist",
    "wishlist_entry",
    "alert",
    "new_alert",
    "alert_trigger",
    "alert_check",
    "price_summary",
    "collection_value",
    "market_stats",
    "recommendation_request",
    "recommendations",
    "import_report",
    "scrape_report",
];

/// Handle `hifi schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    if args.type_name == "list" {
        return output(&SCHEMA_NAMES, flags.format);
    }
    let schema = schema_json(&args.type_name)?;
    output(&schema, flags.format)
}

fn schema_json(name: &str) -> anyhow::Result<serde_json::Value> {
    let schema = match name.replace('-', "_").as_str() {
        "component" => schema_for!(Component),
        "new_component" => schema_for!(NewComponent),
        "listing" => schema_for!(UsedListing),
        "new_listing" => schema_for!(NewListing),
        "gear" => schema_for!(UserGear),
        "new_gear" => schema_for!(NewGear),
        "stack" => schema_for!(UserStack),
        "stack_detail" => schema_for!(StackDetail),
        "wishlist" => schema_for!(WishlistItem),
        "wishlist_entry" => schema_for!(WishlistEntry),
        "alert" => schema_for!(PriceAlert),
        "new_alert" => schema_for!(NewAlert),
        "alert_trigger" => schema_for!(AlertTrigger),
        "alert_check" => schema_for!(AlertCheckReport),
        "price_summary" => schema_for!(PriceSummary),
        "collection_value" => schema_for!(CollectionValue),
        "market_stats" => schema_for!(MarketStats),
        "recommendation_request" => schema_for!(RecommendationRequest),
        "recommendations" => schema_for!(Recommendations),
        "import_report" => schema_for!(ImportReport),
        "scrape_report" => schema_for!(ScrapeReport),
        _ => {
            return Err(CoreError::validation(format!(
                "unknown schema type '{name}'; run 'hifi schema list' for the names"
            ))
            .into());
        }
    };
    Ok(serde_json::to_value(schema)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_name_resolves() {
        for name in SCHEMA_NAMES {
            let schema = schema_json(name).unwrap_or_else(|e| panic!("{name}: {e}"));
            assert!(schema.get("title").is_some() || schema.get("type").is_some(), "{name}");
        }
    }

    #[test]
    fn hyphenated_names_work() {
        let schema = schema_json("market-stats").unwrap();
        assert_eq!(schema["title"], "MarketStats");
    }

    #[test]
    fn unknown_name_is_validation_error() {
        let err = schema_json("turntable").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::Validation(_))
        ));
    }
}
