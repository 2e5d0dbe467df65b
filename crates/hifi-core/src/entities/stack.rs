use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::StackPurpose;

/// A named group of a user's gear, e.g. a desktop rig.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UserStack {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub purpose: StackPurpose,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Ordered membership of a gear item in a stack.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StackMember {
    pub stack_id: String,
    pub gear_id: String,
    pub position: u32,
}
