use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A component a user wants to buy, optionally with a price they'd pay.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct WishlistItem {
    pub id: String,
    pub user_id: String,
    pub component_id: String,
    pub target_price: Option<f64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
