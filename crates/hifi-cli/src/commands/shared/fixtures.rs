//! Seed data for command tests.

use hifi_core::entities::{Component, NewComponent};
use hifi_core::enums::Category;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;

pub fn new_component(brand: &str, name: &str, category: Category, price: f64) -> NewComponent {
    NewComponent {
        brand: brand.into(),
        name: name.into(),
        category,
        price_new: Some(price),
        price_used_min: None,
        price_used_max: None,
        sound_signature: None,
        impedance: None,
        sensitivity: None,
        needs_amp: false,
        driver_type: None,
        expert_grade: None,
        value_rating: None,
        why_recommended: None,
    }
}

pub async fn seed_component(
    ctx: &AppContext,
    brand: &str,
    name: &str,
    category: Category,
    price: f64,
) -> Component {
    ctx.service
        .upsert_component(&new_component(brand, name, category, price))
        .await
        .expect("component should upsert")
        .0
}

pub fn json_flags() -> GlobalFlags {
    GlobalFlags {
        format: OutputFormat::Json,
        limit: None,
        quiet: true,
        verbose: false,
        project: None,
        user: None,
    }
}
