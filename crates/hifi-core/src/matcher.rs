//! Match free-text listing titles to catalog components.
//!
//! Sellers write model names inconsistently (`HD600`, `HD-600`, `hd 600`), so
//! both sides are normalised to lowercase alphanumeric tokens and compared
//! either token-for-token or with adjacent tokens joined together.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Component;

/// Longest run of adjacent text tokens tried when joining (`hd` `6` `xx`).
const MAX_JOIN_WINDOW: usize = 3;

/// A catalog component found in a piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ComponentMatch {
    pub component_id: String,
    pub brand: String,
    pub name: String,
    /// `(0, 1]`, higher when the brand is present and tokens match exactly.
    pub confidence: f64,
}

/// Lowercase, replace anything non-alphanumeric with a space, collapse runs.
#[must_use]
pub fn normalize(text: &str) -> String {
    tokens(text).join(" ")
}

fn tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn contains_sequence(haystack: &[String], needle: &[String]) -> bool {
    !needle.is_empty()
        && haystack.len() >= needle.len()
        && haystack.windows(needle.len()).any(|w| w == needle)
}

fn contains_joined(haystack: &[String], joined: &str) -> bool {
    (1..=MAX_JOIN_WINDOW).any(|size| {
        haystack.len() >= size && haystack.windows(size).any(|w| w.concat() == joined)
    })
}

/// Whether a model name is distinctive enough to match without its brand.
fn distinctive(model_joined: &str) -> bool {
    model_joined.len() >= 4 && model_joined.chars().any(|c| c.is_ascii_digit())
}

fn match_one(text_tokens: &[String], component: &Component) -> Option<f64> {
    let brand = tokens(&component.brand);
    let model = tokens(&component.name);
    if model.is_empty() {
        return None;
    }
    let model_joined = model.concat();

    let brand_present =
        contains_sequence(text_tokens, &brand) || contains_joined(text_tokens, &brand.concat());
    let exact = contains_sequence(text_tokens, &model);
    let joined = !exact && contains_joined(text_tokens, &model_joined);

    match (brand_present, exact, joined) {
        (true, true, _) => Some(1.0),
        (true, false, true) => Some(0.9),
        (false, true, _) if distinctive(&model_joined) => Some(0.7),
        (false, false, true) if distinctive(&model_joined) => Some(0.6),
        _ => None,
    }
}

/// Every catalog component mentioned in `text`, strongest first.
///
/// When one match's model name is a token prefix/substring of another match
/// from the same brand (`Arya` inside `Arya Stealth`), only the longer one is
/// kept.
#[must_use]
pub fn match_components(text: &str, catalog: &[Component]) -> Vec<ComponentMatch> {
    let text_tokens = tokens(text);
    if text_tokens.is_empty() {
        return Vec::new();
    }

    let mut found: Vec<(ComponentMatch, Vec<String>)> = catalog
        .iter()
        .filter_map(|c| {
            match_one(&text_tokens, c).map(|confidence| {
                (
                    ComponentMatch {
                        component_id: c.id.clone(),
                        brand: c.brand.clone(),
                        name: c.name.clone(),
                        confidence,
                    },
                    tokens(&c.name),
                )
            })
        })
        .collect();

    let shadowed: Vec<bool> = found
        .iter()
        .map(|(m, model)| {
            found.iter().any(|(other, other_model)| {
                other.component_id != m.component_id
                    && other.brand.eq_ignore_ascii_case(&m.brand)
                    && other_model.len() > model.len()
                    && contains_sequence(other_model, model)
            })
        })
        .collect();
    let mut idx = 0;
    found.retain(|_| {
        let keep = !shadowed[idx];
        idx += 1;
        keep
    });

    let mut matches: Vec<ComponentMatch> = found.into_iter().map(|(m, _)| m).collect();
    matches.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| b.name.len().cmp(&a.name.len()))
            .then_with(|| a.component_id.cmp(&b.component_id))
    });
    matches
}

/// The strongest match in `text`, if any.
#[must_use]
pub fn best_match(text: &str, catalog: &[Component]) -> Option<ComponentMatch> {
    match_components(text, catalog).into_iter().next()
}

/// A post mentioning more than one distinct catalog component is a bundle.
#[must_use]
pub fn is_bundle(matches: &[ComponentMatch]) -> bool {
    matches.len() > 1
}
