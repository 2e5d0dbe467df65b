//! Recommendation scoring.
//!
//! A score blends three parts into `[0, 1]`:
//!
//! ```text
//! priceFit = avgPrice <= budget ? 0.75 + (avgPrice/budget)*0.25
//!                                : max(0, 1 - (avgPrice-budget)/budget * 1.5)
//! bonus    = min(0.10, valueRating*0.04 + (expertGrade>=3.3 ? 0.05 : 0))
//! score    = priceFit*0.5 + synergyScore*0.5 + bonus
//! ```
//!
//! Everything here is pure; the engine in [`crate::recommend`] decides which
//! budget and preference each component is scored against.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Component;
use crate::enums::SoundSignature;
use crate::grades::EXPERT_BONUS_THRESHOLD;

pub const MAX_BONUS: f64 = 0.10;
const VALUE_RATING_WEIGHT: f64 = 0.04;
const EXPERT_GRADE_BONUS: f64 = 0.05;
const PRICE_WEIGHT: f64 = 0.5;
const SYNERGY_WEIGHT: f64 = 0.5;

/// The parts a score was built from, kept for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScoreBreakdown {
    pub price_fit: f64,
    pub synergy: f64,
    pub bonus: f64,
    pub total: f64,
}

/// How well a price sits against a budget.
///
/// At or under budget the fit ranges from 0.75 (free) to 1.0 (exactly on
/// budget). Over budget it falls by 1.5 per budget-width and bottoms out at 0.
#[must_use]
pub fn price_fit(avg_price: f64, budget: f64) -> f64 {
    if budget <= 0.0 || !budget.is_finite() || !avg_price.is_finite() {
        return 0.0;
    }
    let avg_price = avg_price.max(0.0);
    if avg_price <= budget {
        0.75 + (avg_price / budget) * 0.25
    } else {
        (1.0 - (avg_price - budget) / budget * 1.5).max(0.0)
    }
}

/// Bonus for expert approval, clamped to `[0, MAX_BONUS]`.
#[must_use]
pub fn expert_bonus(value_rating: Option<f64>, expert_grade: Option<f64>) -> f64 {
    let value = value_rating
        .filter(|v| v.is_finite())
        .map_or(0.0, |v| v.max(0.0) * VALUE_RATING_WEIGHT);
    let grade = if expert_grade.is_some_and(|g| g >= EXPERT_BONUS_THRESHOLD - 1e-9) {
        EXPERT_GRADE_BONUS
    } else {
        0.0
    };
    (value + grade).clamp(0.0, MAX_BONUS)
}

/// How well a component's tonality suits the listener's preference.
#[must_use]
pub fn synergy_score(preferred: Option<SoundSignature>, actual: Option<SoundSignature>) -> f64 {
    use SoundSignature::{Bright, Fun, Neutral, Warm};

    let Some(preferred) = preferred else {
        return 0.75;
    };
    let Some(actual) = actual else {
        return 0.5;
    };
    match (preferred, actual) {
        (p, a) if p == a => 1.0,
        (_, Neutral) => 0.7,
        (Warm, Fun) | (Fun, Warm) => 0.65,
        (Bright, Fun) | (Fun, Bright) => 0.55,
        _ => 0.3,
    }
}

/// Blend price fit, synergy and bonus into a final score.
#[must_use]
pub fn blend(price_fit: f64, synergy: f64, bonus: f64) -> ScoreBreakdown {
    let total = (price_fit * PRICE_WEIGHT + synergy * SYNERGY_WEIGHT + bonus).clamp(0.0, 1.0);
    ScoreBreakdown {
        price_fit,
        synergy,
        bonus,
        total,
    }
}

/// Score a catalog component against a budget and signature preference.
///
/// Returns `None` when the component has no known price.
#[must_use]
pub fn score_component(
    component: &Component,
    budget: f64,
    preferred: Option<SoundSignature>,
) -> Option<ScoreBreakdown> {
    let avg = component.avg_price()?;
    let fit = price_fit(avg, budget);
    let synergy = synergy_score(preferred, component.sound_signature);
    let bonus = expert_bonus(component.value_rating, component.expert_grade_numeric());
    Some(blend(fit, synergy, bonus))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn price_fit_peaks_at_budget() {
        assert!(close(price_fit(500.0, 500.0), 1.0));
        assert!(close(price_fit(0.0, 500.0), 0.75));
        assert!(close(price_fit(250.0, 500.0), 0.875));
    }

    #[test]
    fn price_fit_over_budget_falls_to_zero() {
        assert!(close(price_fit(600.0, 500.0), 0.7));
        assert!(close(price_fit(1000.0, 500.0), 0.0));
        assert!(close(price_fit(5000.0, 500.0), 0.0));
    }

    #[test]
    fn price_fit_monotonic_with_distance_above_budget() {
        let budget = 400.0;
        let mut last = price_fit(budget, budget);
        for step in 1..=40 {
            let fit = price_fit(budget + f64::from(step) * 10.0, budget);
            assert!(fit <= last, "fit rose at step {step}");
            last = fit;
        }
    }

    #[test]
    fn price_fit_rises_toward_budget_from_below() {
        let budget = 400.0;
        let mut last = price_fit(0.0, budget);
        for step in 1..=40 {
            let fit = price_fit(f64::from(step) * 10.0, budget);
            assert!(fit >= last);
            last = fit;
        }
    }

    #[test]
    fn price_fit_degenerate_budget() {
        assert_eq!(price_fit(100.0, 0.0), 0.0);
        assert_eq!(price_fit(100.0, -5.0), 0.0);
        assert_eq!(price_fit(f64::NAN, 100.0), 0.0);
    }

    #[rstest]
    #[case(None, None, 0.0)]
    #[case(Some(1.0), None, 0.04)]
    #[case(Some(2.0), Some(3.0), 0.08)]
    #[case(Some(1.0), Some(3.3), 0.09)]
    #[case(Some(3.0), Some(4.3), 0.10)]
    #[case(None, Some(4.0), 0.05)]
    #[case(Some(-2.0), None, 0.0)]
    fn bonus_cases(#[case] value: Option<f64>, #[case] grade: Option<f64>, #[case] expected: f64) {
        assert!(close(expert_bonus(value, grade), expected));
    }

    #[test]
    fn bonus_always_clamped() {
        for v in [-10.0, 0.0, 0.5, 1.5, 2.5, 3.0, 100.0] {
            for g in [None, Some(0.0), Some(3.3), Some(5.0)] {
                let b = expert_bonus(Some(v), g);
                assert!((0.0..=MAX_BONUS).contains(&b), "bonus {b} out of range");
            }
        }
    }

    #[rstest]
    #[case(None, Some(SoundSignature::Warm), 0.75)]
    #[case(Some(SoundSignature::Warm), None, 0.5)]
    #[case(Some(SoundSignature::Warm), Some(SoundSignature::Warm), 1.0)]
    #[case(Some(SoundSignature::Bright), Some(SoundSignature::Neutral), 0.7)]
    #[case(Some(SoundSignature::Fun), Some(SoundSignature::Warm), 0.65)]
    #[case(Some(SoundSignature::Bright), Some(SoundSignature::Fun), 0.55)]
    #[case(Some(SoundSignature::Warm), Some(SoundSignature::Bright), 0.3)]
    #[case(Some(SoundSignature::Neutral), Some(SoundSignature::Fun), 0.3)]
    fn synergy_cases(
        #[case] preferred: Option<SoundSignature>,
        #[case] actual: Option<SoundSignature>,
        #[case] expected: f64,
    ) {
        assert!(close(synergy_score(preferred, actual), expected));
    }

    #[test]
    fn blend_follows_formula() {
        let s = blend(1.0, 0.5, 0.05);
        assert!(close(s.total, 0.8));
        assert_eq!(s.price_fit, 1.0);
        assert_eq!(s.synergy, 0.5);
    }

    #[test]
    fn blend_clamps_to_unit_interval() {
        assert!(close(blend(1.0, 1.0, 0.1).total, 1.0));
        assert!(close(blend(0.0, 0.0, 0.0).total, 0.0));
    }
}
