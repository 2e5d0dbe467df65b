//! Budget-driven recommendation engine.
//!
//! Given a total budget, the categories a listener wants, and a tonal
//! preference, the engine splits the budget across categories, filters the
//! catalog to components priced near each share, scores them with
//! [`crate::scoring`], and returns ranked picks per category.

use std::collections::{BTreeMap, HashMap, HashSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Component;
use crate::enums::{Category, SoundSignature};
use crate::errors::CoreError;
use crate::scoring::{ScoreBreakdown, score_component};

/// Note attached to a transducer that will want an amplifier.
pub const NOTE_NEEDS_AMP: &str = "needs_amp";

/// Everything the engine needs to know about a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RecommendationRequest {
    pub budget: f64,
    /// How far under its share a candidate may be priced, in percent.
    pub range_min_pct: f64,
    /// How far over its share a candidate may be priced, in percent.
    pub range_max_pct: f64,
    pub sound_signature: Option<SoundSignature>,
    pub categories: Vec<Category>,
    /// Catalog IDs the user already owns; never recommended again.
    #[serde(default)]
    pub owned_component_ids: Vec<String>,
    /// Whether the user already owns something that amplifies.
    #[serde(default)]
    pub owns_amplification: bool,
    pub per_category_limit: usize,
    /// Max picks from a single brand within one category (0 = unlimited).
    pub max_per_brand: usize,
}

impl RecommendationRequest {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a non-positive budget, percentages
    /// outside `[0, 100]`, no categories, or a zero limit.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.budget.is_finite() || self.budget <= 0.0 {
            return Err(CoreError::validation(format!(
                "budget must be positive, got {}",
                self.budget
            )));
        }
        for (name, pct) in [
            ("range_min_pct", self.range_min_pct),
            ("range_max_pct", self.range_max_pct),
        ] {
            if !(0.0..=100.0).contains(&pct) {
                return Err(CoreError::validation(format!(
                    "{name} must be between 0 and 100, got {pct}"
                )));
            }
        }
        if self.categories.is_empty() {
            return Err(CoreError::validation("at least one category is required"));
        }
        if self.per_category_limit == 0 {
            return Err(CoreError::validation("per-category limit must be at least 1"));
        }
        Ok(())
    }
}

/// One recommended component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RecommendedItem {
    pub component: Component,
    pub avg_price: f64,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

/// Ranked picks for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryRecommendations {
    pub category: Category,
    pub allocation: f64,
    pub price_floor: f64,
    pub price_ceiling: f64,
    pub items: Vec<RecommendedItem>,
}

/// Full engine output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Recommendations {
    pub budget: f64,
    pub sound_signature: Option<SoundSignature>,
    /// Budget share per requested category.
    pub allocations: BTreeMap<Category, f64>,
    pub groups: Vec<CategoryRecommendations>,
    /// Sum of the cheapest top-N pick in each category.
    pub total_low: f64,
    /// Sum of the most expensive top-N pick in each category.
    pub total_high: f64,
}

/// Split `budget` across `categories` by their relative weights.
///
/// Duplicate categories are ignored. The shares always sum to `budget`.
#[must_use]
pub fn allocate_budget(budget: f64, categories: &[Category]) -> BTreeMap<Category, f64> {
    let unique: Vec<Category> = categories
        .iter()
        .copied()
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let total_weight: f64 = unique.iter().map(|c| c.budget_weight()).sum();
    unique
        .into_iter()
        .map(|c| (c, budget * c.budget_weight() / total_weight))
        .collect()
}

/// Price window `[floor, ceiling]` around a category allocation.
#[must_use]
pub fn price_window(allocation: f64, range_min_pct: f64, range_max_pct: f64) -> (f64, f64) {
    (
        allocation * (1.0 - range_min_pct / 100.0),
        allocation * (1.0 + range_max_pct / 100.0),
    )
}

/// Run the engine over `catalog`.
///
/// # Errors
///
/// Returns `CoreError::Validation` if the request fails validation.
pub fn recommend(
    request: &RecommendationRequest,
    catalog: &[Component],
) -> Result<Recommendations, CoreError> {
    request.validate()?;

    let owned: HashSet<&str> = request
        .owned_component_ids
        .iter()
        .map(String::as_str)
        .collect();
    let amplification_covered = request.owns_amplification
        || request.categories.iter().any(|c| c.amplifies());

    let allocations = allocate_budget(request.budget, &request.categories);
    let mut groups = Vec::with_capacity(allocations.len());

    for (&category, &allocation) in &allocations {
        let (floor, ceiling) =
            price_window(allocation, request.range_min_pct, request.range_max_pct);

        let mut scored: Vec<RecommendedItem> = catalog
            .iter()
            .filter(|c| c.category == category && !owned.contains(c.id.as_str()))
            .filter_map(|c| {
                let avg = c.avg_price()?;
                if avg < floor || avg > ceiling {
                    return None;
                }
                let breakdown = score_component(c, allocation, request.sound_signature)?;
                let mut notes = Vec::new();
                if c.requires_amp() && !amplification_covered {
                    notes.push(NOTE_NEEDS_AMP.to_string());
                }
                Some(RecommendedItem {
                    component: c.clone(),
                    avg_price: avg,
                    score: breakdown.total,
                    breakdown,
                    notes,
                })
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.avg_price.total_cmp(&b.avg_price))
                .then_with(|| a.component.display_name().cmp(&b.component.display_name()))
        });

        let items = cap_per_brand(scored, request.max_per_brand, request.per_category_limit);

        groups.push(CategoryRecommendations {
            category,
            allocation,
            price_floor: floor,
            price_ceiling: ceiling,
            items,
        });
    }

    let total_low = groups
        .iter()
        .filter_map(|g| g.items.iter().map(|i| i.avg_price).min_by(f64::total_cmp))
        .sum();
    let total_high = groups
        .iter()
        .filter_map(|g| g.items.iter().map(|i| i.avg_price).max_by(f64::total_cmp))
        .sum();

    Ok(Recommendations {
        budget: request.budget,
        sound_signature: request.sound_signature,
        allocations,
        groups,
        total_low,
        total_high,
    })
}

fn cap_per_brand(
    ranked: Vec<RecommendedItem>,
    max_per_brand: usize,
    limit: usize,
) -> Vec<RecommendedItem> {
    let mut per_brand: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::with_capacity(limit);
    for item in ranked {
        if out.len() == limit {
            break;
        }
        let count = per_brand
            .entry(item.component.brand.to_lowercase())
            .or_default();
        if max_per_brand > 0 && *count >= max_per_brand {
            continue;
        }
        *count += 1;
        out.push(item);
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::enums::BudgetTier;

    fn component(id: &str, brand: &str, category: Category, price: f64) -> Component {
        Component {
            id: id.into(),
            brand: brand.into(),
            name: id.to_uppercase(),
            category,
            price_new: Some(price),
            price_used_min: None,
            price_used_max: None,
            budget_tier: BudgetTier::from_price(price),
            sound_signature: Some(SoundSignature::Neutral),
            impedance: None,
            sensitivity: None,
            needs_amp: false,
            driver_type: None,
            expert_grade: None,
            value_rating: None,
            why_recommended: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn request(budget: f64, categories: Vec<Category>) -> RecommendationRequest {
        RecommendationRequest {
            budget,
            range_min_pct: 20.0,
            range_max_pct: 10.0,
            sound_signature: None,
            categories,
            owned_component_ids: vec![],
            owns_amplification: false,
            per_category_limit: 5,
            max_per_brand: 0,
        }
    }

    #[test]
    fn single_category_gets_whole_budget() {
        let alloc = allocate_budget(500.0, &[Category::Headphones]);
        assert_eq!(alloc.len(), 1);
        assert!((alloc[&Category::Headphones] - 500.0).abs() < 1e-9);
    }

    #[test]
    fn allocation_sums_to_budget() {
        let alloc = allocate_budget(
            1000.0,
            &[Category::Headphones, Category::Dac, Category::Amp, Category::Dac],
        );
        assert_eq!(alloc.len(), 3);
        let sum: f64 = alloc.values().sum();
        assert!((sum - 1000.0).abs() < 1e-9);
        assert!(alloc[&Category::Headphones] > alloc[&Category::Amp]);
        assert!(alloc[&Category::Amp] > alloc[&Category::Dac]);
    }

    #[test]
    fn filters_to_price_window_and_ranks() {
        let catalog = vec![
            component("a", "A", Category::Headphones, 500.0),
            component("b", "B", Category::Headphones, 420.0),
            component("c", "C", Category::Headphones, 300.0),
            component("d", "D", Category::Headphones, 560.0),
            component("e", "E", Category::Iem, 500.0),
        ];
        let recs = recommend(&request(500.0, vec![Category::Headphones]), &catalog).unwrap();
        let ids: Vec<&str> = recs.groups[0]
            .items
            .iter()
            .map(|i| i.component.id.as_str())
            .collect();
        // 300 is below the 20% floor, 560 is above the 10% ceiling.
        assert_eq!(ids, vec!["a", "b"]);
        assert!(recs.groups[0].items[0].score >= recs.groups[0].items[1].score);
        assert!((recs.total_low - 420.0).abs() < 1e-9);
        assert!((recs.total_high - 500.0).abs() < 1e-9);
    }

    #[test]
    fn result_reports_allocation_per_category() {
        let catalog = vec![component("a", "A", Category::Headphones, 500.0)];
        let recs = recommend(
            &request(1000.0, vec![Category::Headphones, Category::Amp]),
            &catalog,
        )
        .unwrap();

        assert_eq!(
            recs.allocations,
            allocate_budget(1000.0, &[Category::Headphones, Category::Amp])
        );
        for group in &recs.groups {
            assert!((recs.allocations[&group.category] - group.allocation).abs() < 1e-9);
        }
        let json = serde_json::to_value(&recs).unwrap();
        assert!(json["allocations"]["headphones"].is_number());
    }

    #[test]
    fn owned_components_are_excluded() {
        let catalog = vec![
            component("a", "A", Category::Headphones, 500.0),
            component("b", "B", Category::Headphones, 480.0),
        ];
        let mut req = request(500.0, vec![Category::Headphones]);
        req.owned_component_ids = vec!["a".into()];
        let recs = recommend(&req, &catalog).unwrap();
        assert_eq!(recs.groups[0].items.len(), 1);
        assert_eq!(recs.groups[0].items[0].component.id, "b");
    }

    #[test]
    fn brand_cap_and_limit() {
        let catalog = vec![
            component("a1", "Same", Category::Iem, 100.0),
            component("a2", "same", Category::Iem, 99.0),
            component("a3", "Same", Category::Iem, 98.0),
            component("b1", "Other", Category::Iem, 97.0),
        ];
        let mut req = request(100.0, vec![Category::Iem]);
        req.max_per_brand = 2;
        let recs = recommend(&req, &catalog).unwrap();
        let ids: Vec<&str> = recs.groups[0]
            .items
            .iter()
            .map(|i| i.component.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a1", "a2", "b1"]);

        req.per_category_limit = 1;
        let recs = recommend(&req, &catalog).unwrap();
        assert_eq!(recs.groups[0].items.len(), 1);
    }

    #[test]
    fn needs_amp_note_unless_covered() {
        let mut hp = component("hd", "Sennheiser", Category::Headphones, 300.0);
        hp.impedance = Some(300);
        let amp = component("amp", "Schiit", Category::Amp, 150.0);
        let catalog = vec![hp, amp];

        let recs = recommend(&request(300.0, vec![Category::Headphones]), &catalog).unwrap();
        assert_eq!(recs.groups[0].items[0].notes, vec![NOTE_NEEDS_AMP.to_string()]);

        let mut req = request(300.0, vec![Category::Headphones]);
        req.owns_amplification = true;
        let recs = recommend(&req, &catalog).unwrap();
        assert!(recs.groups[0].items[0].notes.is_empty());
    }

    #[test]
    fn preference_reorders_candidates() {
        let mut warm = component("warm", "W", Category::Headphones, 480.0);
        warm.sound_signature = Some(SoundSignature::Warm);
        let mut bright = component("bright", "B", Category::Headphones, 500.0);
        bright.sound_signature = Some(SoundSignature::Bright);
        let catalog = vec![warm, bright];

        let mut req = request(500.0, vec![Category::Headphones]);
        req.sound_signature = Some(SoundSignature::Warm);
        let recs = recommend(&req, &catalog).unwrap();
        assert_eq!(recs.groups[0].items[0].component.id, "warm");
    }

    #[test]
    fn invalid_requests_rejected() {
        assert!(recommend(&request(0.0, vec![Category::Dac]), &[]).is_err());
        assert!(recommend(&request(100.0, vec![]), &[]).is_err());
        let mut req = request(100.0, vec![Category::Dac]);
        req.range_max_pct = 150.0;
        assert!(recommend(&req, &[]).is_err());
    }

    #[test]
    fn scores_stay_in_unit_interval() {
        let mut c = component("x", "X", Category::Dac, 100.0);
        c.value_rating = Some(3.0);
        c.expert_grade = Some("S+".into());
        let recs = recommend(&request(100.0, vec![Category::Dac]), &[c]).unwrap();
        let s = recs.groups[0].items[0].score;
        assert!((0.0..=1.0).contains(&s));
    }
}
