//! Gear update builder.

use chrono::NaiveDate;
use serde::Serialize;
use hifi_core::enums::Condition;

#[derive(Debug, Clone, Default, Serialize)]
pub struct GearUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_brand: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
}

pub struct GearUpdateBuilder(GearUpdate);

impl GearUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(GearUpdate::default())
    }

    #[must_use]
    pub fn custom_brand(mut self, brand: Option<String>) -> Self {
        self.0.custom_brand = Some(brand);
        self
    }

    #[must_use]
    pub fn custom_name(mut self, name: Option<String>) -> Self {
        self.0.custom_name = Some(name);
        self
    }

    #[must_use]
    pub fn purchase_price(mut self, price: Option<f64>) -> Self {
        self.0.purchase_price = Some(price);
        self
    }

    #[must_use]
    pub fn purchase_date(mut self, date: Option<NaiveDate>) -> Self {
        self.0.purchase_date = Some(date);
        self
    }

    #[must_use]
    pub fn condition(mut self, condition: Condition) -> Self {
        self.0.condition = Some(condition);
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: Option<String>) -> Self {
        self.0.notes = Some(notes);
        self
    }

    #[must_use]
    pub fn build(self) -> GearUpdate {
        self.0
    }
}

impl Default for GearUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
