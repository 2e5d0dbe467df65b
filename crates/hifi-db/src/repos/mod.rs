//! Repository modules implementing operations for all HiFinder entities.
//!
//! Each module adds methods to `HiService` via `impl HiService` blocks.

pub mod alerts;
pub mod components;
pub mod gear;
pub mod listings;
pub mod stacks;
pub mod stats;
pub mod wishlist;

use serde::Serialize;

/// What an upsert did with the incoming record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertOutcome {
    Inserted,
    Updated,
    /// The stored row is in a terminal state and was left alone.
    Skipped,
}

/// Render an optional row limit as a SQL suffix.
pub(crate) fn limit_clause(limit: Option<u32>) -> String {
    limit.map_or_else(String::new, |n| format!(" LIMIT {n}"))
}
