use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Condition, ListingSource, ListingStatus};
use crate::errors::CoreError;

/// A secondhand-marketplace post for a catalog component.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct UsedListing {
    pub id: String,
    pub component_id: String,
    pub source: ListingSource,
    pub external_id: Option<String>,
    pub url: String,
    pub title: String,
    pub price: f64,
    pub condition: Condition,
    pub status: ListingStatus,
    pub location: Option<String>,
    pub seller_username: Option<String>,
    /// Seller confirmed trades count, when the source exposes it.
    pub seller_feedback: Option<i64>,
    pub is_bundle: bool,
    /// Listings sharing a group id were posted together as one bundle.
    pub bundle_group_id: Option<String>,
    pub bundle_total_price: Option<f64>,
    pub posted_at: DateTime<Utc>,
    pub date_sold: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing record as produced by import files and source scrapers.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct NewListing {
    pub component_id: String,
    pub source: ListingSource,
    #[serde(default)]
    pub external_id: Option<String>,
    pub url: String,
    pub title: String,
    pub price: f64,
    pub condition: Condition,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub seller_username: Option<String>,
    #[serde(default)]
    pub seller_feedback: Option<i64>,
    #[serde(default)]
    pub is_bundle: bool,
    #[serde(default)]
    pub bundle_group_id: Option<String>,
    #[serde(default)]
    pub bundle_total_price: Option<f64>,
    /// Defaults to the time of upsert.
    #[serde(default)]
    pub posted_at: Option<DateTime<Utc>>,
}

impl NewListing {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for an empty URL or title, or a price
    /// that is not a positive number.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.url.trim().is_empty() {
            return Err(CoreError::validation("listing url is required"));
        }
        if self.title.trim().is_empty() {
            return Err(CoreError::validation("listing title is required"));
        }
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(CoreError::validation(format!(
                "listing price must be positive, got {}",
                self.price
            )));
        }
        if self.bundle_total_price.is_some_and(|p| p < self.price) {
            return Err(CoreError::validation(
                "bundle total price cannot be below the item price",
            ));
        }
        Ok(())
    }
}
