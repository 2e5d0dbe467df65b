//! Price alert update builder.

use serde::Serialize;
use hifi_core::enums::{AlertType, Condition};

#[derive(Debug, Clone, Default, Serialize)]
pub struct AlertUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_type: Option<AlertType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_price: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_min: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_max: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_condition: Option<Option<Condition>>,
}

pub struct AlertUpdateBuilder(AlertUpdate);

impl AlertUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(AlertUpdate::default())
    }

    #[must_use]
    pub fn alert_type(mut self, alert_type: AlertType) -> Self {
        self.0.alert_type = Some(alert_type);
        self
    }

    #[must_use]
    pub fn target_price(mut self, price: Option<f64>) -> Self {
        self.0.target_price = Some(price);
        self
    }

    #[must_use]
    pub fn price_min(mut self, price: Option<f64>) -> Self {
        self.0.price_min = Some(price);
        self
    }

    #[must_use]
    pub fn price_max(mut self, price: Option<f64>) -> Self {
        self.0.price_max = Some(price);
        self
    }

    #[must_use]
    pub fn min_condition(mut self, condition: Option<Condition>) -> Self {
        self.0.min_condition = Some(condition);
        self
    }

    #[must_use]
    pub fn build(self) -> AlertUpdate {
        self.0
    }
}

impl Default for AlertUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
