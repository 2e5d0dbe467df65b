use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Category, Condition};
use crate::errors::CoreError;

/// A piece of gear a user owns, either a catalog component or a custom entry.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct UserGear {
    pub id: String,
    pub user_id: String,
    pub component_id: Option<String>,
    pub custom_brand: Option<String>,
    pub custom_name: Option<String>,
    pub custom_category: Option<Category>,
    pub purchase_price: Option<f64>,
    pub purchase_date: Option<NaiveDate>,
    pub condition: Condition,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for adding gear to a collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct NewGear {
    pub component_id: Option<String>,
    pub custom_brand: Option<String>,
    pub custom_name: Option<String>,
    pub custom_category: Option<Category>,
    pub purchase_price: Option<f64>,
    pub purchase_date: Option<NaiveDate>,
    pub condition: Option<Condition>,
    pub notes: Option<String>,
}

impl NewGear {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` when neither a catalog component nor a
    /// complete custom description is given, or the purchase price is negative.
    pub fn validate(&self) -> Result<(), CoreError> {
        let custom_complete = self.custom_brand.as_deref().is_some_and(|b| !b.trim().is_empty())
            && self.custom_name.as_deref().is_some_and(|n| !n.trim().is_empty())
            && self.custom_category.is_some();
        if self.component_id.is_none() && !custom_complete {
            return Err(CoreError::validation(
                "gear needs a component id or custom brand, name and category",
            ));
        }
        if self.purchase_price.is_some_and(|p| !p.is_finite() || p < 0.0) {
            return Err(CoreError::validation("purchase price must be non-negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_gear_is_valid() {
        let gear = NewGear {
            component_id: Some("cmp-00000001".into()),
            ..Default::default()
        };
        assert!(gear.validate().is_ok());
    }

    #[test]
    fn custom_gear_requires_all_fields() {
        let mut gear = NewGear {
            custom_brand: Some("DIY".into()),
            custom_name: Some("Cmoy".into()),
            ..Default::default()
        };
        assert!(gear.validate().is_err());
        gear.custom_category = Some(Category::Amp);
        assert!(gear.validate().is_ok());
    }

    #[test]
    fn negative_price_rejected() {
        let gear = NewGear {
            component_id: Some("cmp-00000001".into()),
            purchase_price: Some(-1.0),
            ..Default::default()
        };
        assert!(gear.validate().is_err());
    }
}
