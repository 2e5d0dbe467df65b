//! Marketplace post parsing.
//!
//! Secondhand audio posts follow loose conventions. r/AVexchange titles look
//! like `[WTS] [US-CA] [H] Sennheiser HD 600 [W] PayPal, $250`: a trade tag, a
//! location tag, then what the poster has and what they want. Prices and
//! condition words are pulled out of free text.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Condition;

/// Upper bound for a believable single-item asking price.
const MAX_PLAUSIBLE_PRICE: f64 = 100_000.0;

/// Trade intent declared in a post title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TradeType {
    /// Want to sell.
    Wts,
    /// Want to buy.
    Wtb,
    /// Want to trade.
    Wtt,
    Unknown,
}

/// Structured view of a marketplace post title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ParsedTitle {
    pub trade_type: TradeType,
    pub location: Option<String>,
    /// What the poster has.
    pub have: String,
    /// What the poster wants in return.
    pub want: String,
}

struct Tag<'a> {
    content: &'a str,
    start: usize,
    end: usize,
}

fn bracket_tags(title: &str) -> Vec<Tag<'_>> {
    let mut tags = Vec::new();
    let mut search_from = 0;
    while let Some(open_rel) = title[search_from..].find('[') {
        let open = search_from + open_rel;
        let Some(close_rel) = title[open..].find(']') else {
            break;
        };
        let close = open + close_rel;
        tags.push(Tag {
            content: title[open + 1..close].trim(),
            start: open,
            end: close + 1,
        });
        search_from = close + 1;
    }
    tags
}

/// Parse an r/AVexchange style title.
///
/// Titles without `[H]`/`[W]` markers put the whole non-tag text in `have`.
#[must_use]
pub fn parse_reddit_title(title: &str) -> ParsedTitle {
    let tags = bracket_tags(title);

    let mut trade_type = TradeType::Unknown;
    let mut location = None;
    let mut have_tag: Option<&Tag<'_>> = None;
    let mut want_tag: Option<&Tag<'_>> = None;

    for tag in &tags {
        let upper = tag.content.to_ascii_uppercase();
        match upper.as_str() {
            "H" => have_tag = Some(tag),
            "W" => want_tag = Some(tag),
            _ if upper.contains("WTS") => trade_type = TradeType::Wts,
            _ if upper.contains("WTB") => trade_type = TradeType::Wtb,
            _ if upper.contains("WTT") => trade_type = TradeType::Wtt,
            _ if location.is_none() && have_tag.is_none() && !tag.content.is_empty() => {
                location = Some(tag.content.to_string());
            }
            _ => {}
        }
    }

    let (have, want) = match (have_tag, want_tag) {
        (Some(h), Some(w)) if h.end <= w.start => (
            title[h.end..w.start].trim().to_string(),
            title[w.end..].trim().to_string(),
        ),
        (Some(h), Some(w)) => (
            title[h.end..].trim().to_string(),
            title[w.end..h.start].trim().to_string(),
        ),
        (Some(h), None) => (title[h.end..].trim().to_string(), String::new()),
        (None, Some(w)) => (
            strip_tags(&title[..w.start], &tags),
            title[w.end..].trim().to_string(),
        ),
        (None, None) => (strip_tags(title, &tags), String::new()),
    };

    ParsedTitle {
        trade_type,
        location,
        have,
        want,
    }
}

fn strip_tags(text: &str, tags: &[Tag<'_>]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for tag in tags {
        if tag.start >= text.len() {
            break;
        }
        out.push_str(&text[cursor..tag.start]);
        cursor = tag.end.min(text.len());
    }
    if cursor < text.len() {
        out.push_str(&text[cursor..]);
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a number like `1,299.99` starting at byte `start`.
///
/// Returns the value and the byte index just past it.
fn parse_number(bytes: &[u8], start: usize) -> Option<(f64, usize)> {
    let mut i = start;
    let mut digits = String::new();
    while i < bytes.len() {
        let b = bytes[i];
        if b.is_ascii_digit() {
            digits.push(b as char);
        } else if b == b',' && i + 1 < bytes.len() && bytes[i + 1].is_ascii_digit() && !digits.is_empty() {
            // thousands separator
        } else if b == b'.'
            && i + 1 < bytes.len()
            && bytes[i + 1].is_ascii_digit()
            && !digits.contains('.')
            && !digits.is_empty()
        {
            digits.push('.');
        } else {
            break;
        }
        i += 1;
    }
    if digits.is_empty() {
        return None;
    }
    digits.parse::<f64>().ok().map(|v| (v, i))
}

fn followed_by_price_word(lower: &str, from: usize) -> bool {
    let rest = lower[from..].trim_start();
    ["shipped", "usd", "obo", "dollars", "bucks", "+ shipping", "plus shipping"]
        .iter()
        .any(|w| rest.starts_with(w))
}

/// Find every asking price in free text.
///
/// Recognises `$250`, `$ 250`, `250$`, `$1,299.99`, `250 shipped`, `250 USD`
/// and `250 OBO`. Bare numbers are ignored so model numbers such as `HD 600`
/// are not mistaken for prices.
#[must_use]
pub fn extract_prices(text: &str) -> Vec<f64> {
    let lower = text.to_ascii_lowercase();
    let bytes = lower.as_bytes();
    let mut prices = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b == b'$' {
            let mut j = i + 1;
            while j < bytes.len() && bytes[j] == b' ' {
                j += 1;
            }
            if let Some((value, end)) = parse_number(bytes, j) {
                prices.push(value);
                i = end;
                continue;
            }
        } else if b.is_ascii_digit() {
            let boundary =
                i == 0 || (!bytes[i - 1].is_ascii_alphanumeric() && bytes[i - 1] != b'.');
            if let Some((value, end)) = parse_number(bytes, i) {
                if boundary
                    && ((end < bytes.len() && bytes[end] == b'$')
                        || followed_by_price_word(&lower, end))
                {
                    prices.push(value);
                }
                i = end.max(i + 1);
                continue;
            }
        }
        i += 1;
    }

    prices.retain(|p| *p > 0.0 && *p < MAX_PLAUSIBLE_PRICE);
    prices
}

/// First asking price found in `text`.
#[must_use]
pub fn extract_price(text: &str) -> Option<f64> {
    extract_prices(text).into_iter().next()
}

/// Guess item condition from descriptive words. Defaults to `Good`.
#[must_use]
pub fn detect_condition(text: &str) -> Condition {
    let lower = text.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| lower.contains(w));

    if has(&["for parts", "not working", "broken", "as-is"]) {
        Condition::Parts
    } else if has(&["bnib", "brand new", "sealed", "unopened"]) {
        Condition::New
    } else if has(&["like new", "like-new", "mint", "lnib", "pristine"]) {
        Condition::LikeNew
    } else if has(&["excellent"]) {
        Condition::Excellent
    } else if has(&["very good", "great condition", "light use", "lightly used"]) {
        Condition::VeryGood
    } else if has(&["scratch", "scuff", "heavy wear", "fair condition", "worn"]) {
        Condition::Fair
    } else {
        Condition::Good
    }
}
