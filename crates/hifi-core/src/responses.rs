//! Aggregate and report types returned by repositories and `hifi` commands.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{AlertTrigger, Component, PriceAlert, UserGear, UserStack, WishlistItem};

/// Asking and sold price statistics for one component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PriceSummary {
    pub component_id: String,
    pub available_count: u32,
    pub min_price: Option<f64>,
    pub median_price: Option<f64>,
    pub mean_price: Option<f64>,
    /// Sold within the last 90 days.
    pub sold_count: u32,
    pub mean_sold_price: Option<f64>,
}

/// Value of a user's active gear.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CollectionValue {
    pub user_id: String,
    pub item_count: u32,
    pub purchase_total: f64,
    pub estimated_value: f64,
    /// `estimated_value - purchase_total`, negative when gear depreciated.
    pub change: f64,
    pub by_category: BTreeMap<String, u32>,
}

/// Marketplace and catalog counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MarketStats {
    pub components_by_category: BTreeMap<String, u32>,
    pub listings_by_status: BTreeMap<String, u32>,
    pub available_by_source: BTreeMap<String, u32>,
    pub mean_asking_price: Option<f64>,
    pub computed_at: String,
}

/// A gear item as shown inside a stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StackGear {
    pub position: u32,
    pub gear: UserGear,
    pub component: Option<Component>,
}

/// A stack with its ordered gear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StackDetail {
    pub stack: UserStack,
    pub gear: Vec<StackGear>,
    pub total_purchase_price: f64,
}

/// A wishlist item with the cheapest matching listing right now.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WishlistEntry {
    pub item: WishlistItem,
    pub component: Component,
    pub lowest_available_price: Option<f64>,
    pub available_listings: u32,
    /// Lowest listing is at or under the item's target price.
    pub below_target: bool,
}

/// One alert and the listings that just fired it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AlertCheckResult {
    pub alert: PriceAlert,
    pub new_triggers: Vec<AlertTrigger>,
}

/// Outcome of evaluating alerts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AlertCheckReport {
    pub alerts_checked: u32,
    pub triggered: Vec<AlertCheckResult>,
}

/// Outcome of a JSONL catalog or listing import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ImportReport {
    pub read: u32,
    pub inserted: u32,
    pub updated: u32,
    pub skipped: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// Outcome of scraping marketplace sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ScrapeReport {
    pub fetched: u32,
    pub inserted: u32,
    pub updated: u32,
    pub unmatched: u32,
    pub bundles: u32,
    pub skipped_no_price: u32,
}
