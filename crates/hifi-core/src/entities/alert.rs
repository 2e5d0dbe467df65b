use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{AlertType, Condition};
use crate::errors::CoreError;

/// Tolerance around the target price for `AlertType::Exact`.
pub const EXACT_TOLERANCE: f64 = 0.05;

/// A user's request to be told when a component is listed at a given price.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PriceAlert {
    pub id: String,
    pub user_id: String,
    pub component_id: String,
    pub alert_type: AlertType,
    pub target_price: Option<f64>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    /// Worst acceptable listing condition.
    pub min_condition: Option<Condition>,
    pub is_active: bool,
    pub trigger_count: u32,
    pub last_triggered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PriceAlert {
    /// Whether a listing at `price` in `condition` satisfies this alert.
    #[must_use]
    pub fn matches(&self, price: f64, condition: Condition) -> bool {
        if let Some(min) = self.min_condition {
            if !condition.meets(min) {
                return false;
            }
        }
        price_satisfies(
            self.alert_type,
            self.target_price,
            self.price_min,
            self.price_max,
            price,
        )
    }
}

/// Check the price fields required by an alert type.
///
/// # Errors
///
/// Returns `CoreError::Validation` when `below`/`exact` lack a positive target,
/// or `range` lacks bounds or has `min >= max`.
pub fn validate_alert_prices(
    alert_type: AlertType,
    target_price: Option<f64>,
    price_min: Option<f64>,
    price_max: Option<f64>,
) -> Result<(), CoreError> {
    match alert_type {
        AlertType::Below | AlertType::Exact => match target_price {
            Some(t) if t.is_finite() && t > 0.0 => Ok(()),
            _ => Err(CoreError::validation(format!(
                "{alert_type} alerts need a positive target price"
            ))),
        },
        AlertType::Range => match (price_min, price_max) {
            (Some(min), Some(max)) if min >= 0.0 && min < max => Ok(()),
            (Some(min), Some(max)) => Err(CoreError::validation(format!(
                "range alert needs 0 <= min < max, got {min}..{max}"
            ))),
            _ => Err(CoreError::validation(
                "range alerts need both price_min and price_max",
            )),
        },
    }
}

fn price_satisfies(
    alert_type: AlertType,
    target: Option<f64>,
    min: Option<f64>,
    max: Option<f64>,
    price: f64,
) -> bool {
    match alert_type {
        AlertType::Below => target.is_some_and(|t| price <= t),
        AlertType::Exact => target.is_some_and(|t| (price - t).abs() <= t * EXACT_TOLERANCE),
        AlertType::Range => match (min, max) {
            (Some(lo), Some(hi)) => price >= lo && price <= hi,
            _ => false,
        },
    }
}

/// Alert creation input.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct NewAlert {
    pub component_id: String,
    pub alert_type: AlertType,
    #[serde(default)]
    pub target_price: Option<f64>,
    #[serde(default)]
    pub price_min: Option<f64>,
    #[serde(default)]
    pub price_max: Option<f64>,
    #[serde(default)]
    pub min_condition: Option<Condition>,
}

impl NewAlert {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` when the prices do not suit the alert type.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_alert_prices(
            self.alert_type,
            self.target_price,
            self.price_min,
            self.price_max,
        )
    }
}

/// One firing of an alert for a specific listing.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AlertTrigger {
    pub id: String,
    pub alert_id: String,
    pub listing_id: String,
    pub listing_price: f64,
    pub listing_title: String,
    pub triggered_at: DateTime<Utc>,
}
