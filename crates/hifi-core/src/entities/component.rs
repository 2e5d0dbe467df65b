use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{BudgetTier, Category, SoundSignature};
use crate::errors::CoreError;
use crate::grades::grade_to_numeric;

/// Impedance (ohms) from which a transducer is assumed to need an amplifier.
pub const HIGH_IMPEDANCE_OHMS: u32 = 150;

/// Sensitivity (dB/mW) under which a transducer is assumed to need an amplifier.
pub const LOW_SENSITIVITY_DB: f64 = 95.0;

/// A catalog entry for one audio product.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Component {
    pub id: String,
    pub brand: String,
    pub name: String,
    pub category: Category,
    pub price_new: Option<f64>,
    pub price_used_min: Option<f64>,
    pub price_used_max: Option<f64>,
    pub budget_tier: BudgetTier,
    pub sound_signature: Option<SoundSignature>,
    /// Ohms.
    pub impedance: Option<u32>,
    /// dB/mW.
    pub sensitivity: Option<f64>,
    pub needs_amp: bool,
    pub driver_type: Option<String>,
    /// Letter grade from expert reviews (e.g. `A-`).
    pub expert_grade: Option<String>,
    /// Expert value rating, 0 to 3.
    pub value_rating: Option<f64>,
    pub why_recommended: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Component {
    /// Typical market price: the middle of the used range when known,
    /// otherwise the new price.
    #[must_use]
    pub fn avg_price(&self) -> Option<f64> {
        match (self.price_used_min, self.price_used_max) {
            (Some(min), Some(max)) => Some(f64::midpoint(min, max)),
            _ => self.price_new,
        }
    }

    #[must_use]
    pub fn expert_grade_numeric(&self) -> Option<f64> {
        self.expert_grade.as_deref().and_then(grade_to_numeric)
    }

    /// Whether this transducer will struggle on a phone or laptop output.
    #[must_use]
    pub fn requires_amp(&self) -> bool {
        if !self.category.is_transducer() {
            return false;
        }
        self.needs_amp
            || self.impedance.is_some_and(|ohms| ohms >= HIGH_IMPEDANCE_OHMS)
            || self.sensitivity.is_some_and(|db| db < LOW_SENSITIVITY_DB)
    }

    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.name)
    }
}

/// Catalog import record. IDs, tiers and timestamps are assigned on upsert.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct NewComponent {
    pub brand: String,
    pub name: String,
    pub category: Category,
    #[serde(default)]
    pub price_new: Option<f64>,
    #[serde(default)]
    pub price_used_min: Option<f64>,
    #[serde(default)]
    pub price_used_max: Option<f64>,
    #[serde(default)]
    pub sound_signature: Option<SoundSignature>,
    #[serde(default)]
    pub impedance: Option<u32>,
    #[serde(default)]
    pub sensitivity: Option<f64>,
    #[serde(default)]
    pub needs_amp: bool,
    #[serde(default)]
    pub driver_type: Option<String>,
    #[serde(default)]
    pub expert_grade: Option<String>,
    #[serde(default)]
    pub value_rating: Option<f64>,
    #[serde(default)]
    pub why_recommended: Option<String>,
}

impl NewComponent {
    /// Check field ranges before the record is written.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for empty names, negative prices, an
    /// inverted used range, an unknown expert grade or an out-of-range value
    /// rating.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.brand.trim().is_empty() || self.name.trim().is_empty() {
            return Err(CoreError::validation("component brand and name are required"));
        }
        for (field, price) in [
            ("price_new", self.price_new),
            ("price_used_min", self.price_used_min),
            ("price_used_max", self.price_used_max),
        ] {
            if price.is_some_and(|p| !p.is_finite() || p < 0.0) {
                return Err(CoreError::validation(format!(
                    "{field} must be a non-negative number"
                )));
            }
        }
        if let (Some(min), Some(max)) = (self.price_used_min, self.price_used_max) {
            if min > max {
                return Err(CoreError::validation(format!(
                    "used price range is inverted ({min} > {max})"
                )));
            }
        }
        if let Some(grade) = &self.expert_grade {
            if grade_to_numeric(grade).is_none() {
                return Err(CoreError::validation(format!("unknown expert grade '{grade}'")));
            }
        }
        if self
            .value_rating
            .is_some_and(|v| !(0.0..=3.0).contains(&v))
        {
            return Err(CoreError::validation("value_rating must be between 0 and 3"));
        }
        Ok(())
    }

    /// Budget tier from the best available price (used midpoint, then new).
    #[must_use]
    pub fn budget_tier(&self) -> BudgetTier {
        let price = match (self.price_used_min, self.price_used_max) {
            (Some(min), Some(max)) => f64::midpoint(min, max),
            _ => self.price_new.unwrap_or(0.0),
        };
        BudgetTier::from_price(price)
    }
}
