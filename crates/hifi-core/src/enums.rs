//! Categories, signatures, conditions and status enums for HiFinder.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! `ListingStatus` provides `allowed_next_states()` to enforce valid
//! transitions at the application layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Kind of audio component in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Headphones,
    Iem,
    Dac,
    Amp,
    Combo,
}

impl Category {
    pub const ALL: [Self; 5] = [
        Self::Headphones,
        Self::Iem,
        Self::Dac,
        Self::Amp,
        Self::Combo,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Headphones => "headphones",
            Self::Iem => "iem",
            Self::Dac => "dac",
            Self::Amp => "amp",
            Self::Combo => "combo",
        }
    }

    /// Headphones and IEMs turn signal into sound; everything else feeds them.
    #[must_use]
    pub const fn is_transducer(self) -> bool {
        matches!(self, Self::Headphones | Self::Iem)
    }

    /// Whether this category provides amplification for a transducer.
    #[must_use]
    pub const fn amplifies(self) -> bool {
        matches!(self, Self::Amp | Self::Combo)
    }

    /// Relative share of a multi-category budget.
    #[must_use]
    pub const fn budget_weight(self) -> f64 {
        match self {
            Self::Headphones | Self::Iem => 0.5,
            Self::Combo => 0.35,
            Self::Amp => 0.25,
            Self::Dac => 0.2,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SoundSignature
// ---------------------------------------------------------------------------

/// Tonal character of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SoundSignature {
    Neutral,
    Warm,
    Bright,
    /// V-shaped: boosted bass and treble.
    Fun,
}

impl SoundSignature {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Warm => "warm",
            Self::Bright => "bright",
            Self::Fun => "fun",
        }
    }
}

impl fmt::Display for SoundSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// BudgetTier
// ---------------------------------------------------------------------------

/// Price bucket label applied to a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BudgetTier {
    Budget,
    Entry,
    MidRange,
    HighEnd,
    SummitFi,
}

impl BudgetTier {
    /// Classify a price (USD) into a tier.
    #[must_use]
    pub fn from_price(price: f64) -> Self {
        if price < 150.0 {
            Self::Budget
        } else if price < 400.0 {
            Self::Entry
        } else if price < 1000.0 {
            Self::MidRange
        } else if price < 2500.0 {
            Self::HighEnd
        } else {
            Self::SummitFi
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::Entry => "entry",
            Self::MidRange => "mid_range",
            Self::HighEnd => "high_end",
            Self::SummitFi => "summit_fi",
        }
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ListingSource
// ---------------------------------------------------------------------------

/// Marketplace a used listing was collected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ListingSource {
    Reddit,
    Reverb,
    Manual,
}

impl ListingSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reddit => "reddit",
            Self::Reverb => "reverb",
            Self::Manual => "manual",
        }
    }
}

impl fmt::Display for ListingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Condition
// ---------------------------------------------------------------------------

/// Physical condition of a used item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    New,
    LikeNew,
    Excellent,
    VeryGood,
    Good,
    Fair,
    Parts,
}

impl Condition {
    /// Ordering from best (`New` = 6) to worst (`Parts` = 0).
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::New => 6,
            Self::LikeNew => 5,
            Self::Excellent => 4,
            Self::VeryGood => 3,
            Self::Good => 2,
            Self::Fair => 1,
            Self::Parts => 0,
        }
    }

    /// Whether this condition is at least as good as `minimum`.
    #[must_use]
    pub const fn meets(self, minimum: Self) -> bool {
        self.rank() >= minimum.rank()
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::LikeNew => "like_new",
            Self::Excellent => "excellent",
            Self::VeryGood => "very_good",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Parts => "parts",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ListingStatus
// ---------------------------------------------------------------------------

/// Status of a used listing.
///
/// ```text
/// available → sold
///           → removed
///           → expired → available (relisted)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Available,
    Sold,
    Expired,
    Removed,
}

impl ListingStatus {
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Available => &[Self::Sold, Self::Expired, Self::Removed],
            Self::Expired => &[Self::Available],
            Self::Sold | Self::Removed => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Sold => "sold",
            Self::Expired => "expired",
            Self::Removed => "removed",
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AlertType
// ---------------------------------------------------------------------------

/// How a price alert compares listing prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    /// Fires when a listing is at or under the target.
    Below,
    /// Fires when a listing is within 5 % of the target.
    Exact,
    /// Fires when a listing falls inside `[price_min, price_max]`.
    Range,
}

impl AlertType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Below => "below",
            Self::Exact => "exact",
            Self::Range => "range",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// StackPurpose
// ---------------------------------------------------------------------------

/// What a user's stack is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StackPurpose {
    Desktop,
    Portable,
    Studio,
    Gaming,
    #[default]
    General,
}

impl StackPurpose {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Portable => "portable",
            Self::Studio => "studio",
            Self::Gaming => "gaming",
            Self::General => "general",
        }
    }
}

impl fmt::Display for StackPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_tier_boundaries() {
        assert_eq!(BudgetTier::from_price(0.0), BudgetTier::Budget);
        assert_eq!(BudgetTier::from_price(149.99), BudgetTier::Budget);
        assert_eq!(BudgetTier::from_price(150.0), BudgetTier::Entry);
        assert_eq!(BudgetTier::from_price(399.0), BudgetTier::Entry);
        assert_eq!(BudgetTier::from_price(400.0), BudgetTier::MidRange);
        assert_eq!(BudgetTier::from_price(1000.0), BudgetTier::HighEnd);
        assert_eq!(BudgetTier::from_price(2500.0), BudgetTier::SummitFi);
    }

    #[test]
    fn listing_transitions() {
        assert!(ListingStatus::Available.can_transition_to(ListingStatus::Sold));
        assert!(ListingStatus::Available.can_transition_to(ListingStatus::Expired));
        assert!(ListingStatus::Expired.can_transition_to(ListingStatus::Available));
        assert!(!ListingStatus::Sold.can_transition_to(ListingStatus::Available));
        assert!(!ListingStatus::Removed.can_transition_to(ListingStatus::Available));
        assert!(!ListingStatus::Expired.can_transition_to(ListingStatus::Sold));
    }

    #[test]
    fn condition_ranking() {
        assert!(Condition::New.meets(Condition::Excellent));
        assert!(Condition::Excellent.meets(Condition::Excellent));
        assert!(!Condition::Good.meets(Condition::VeryGood));
        assert!(Condition::Parts.meets(Condition::Parts));
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&BudgetTier::SummitFi).unwrap();
        assert_eq!(json, "\"summit_fi\"");
        let cond: Condition = serde_json::from_str("\"like_new\"").unwrap();
        assert_eq!(cond, Condition::LikeNew);
        assert_eq!(Category::Combo.to_string(), "combo");
    }

    #[test]
    fn as_str_matches_serde() {
        for cat in Category::ALL {
            let json = serde_json::to_string(&cat).unwrap();
            assert_eq!(json, format!("\"{}\"", cat.as_str()));
        }
    }

    #[test]
    fn transducer_and_amplifier_roles() {
        assert!(Category::Headphones.is_transducer());
        assert!(Category::Iem.is_transducer());
        assert!(!Category::Dac.is_transducer());
        assert!(Category::Amp.amplifies());
        assert!(Category::Combo.amplifies());
        assert!(!Category::Dac.amplifies());
    }
}
