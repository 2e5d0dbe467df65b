//! ID prefixes for every persisted entity.
//!
//! IDs are `"{prefix}-{8 hex chars}"`, generated by the database layer.

pub const PREFIX_COMPONENT: &str = "cmp";
pub const PREFIX_LISTING: &str = "lst";
pub const PREFIX_GEAR: &str = "gea";
pub const PREFIX_STACK: &str = "stk";
pub const PREFIX_WISHLIST: &str = "wsh";
pub const PREFIX_ALERT: &str = "alr";
pub const PREFIX_TRIGGER: &str = "trg";

pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_COMPONENT,
    PREFIX_LISTING,
    PREFIX_GEAR,
    PREFIX_STACK,
    PREFIX_WISHLIST,
    PREFIX_ALERT,
    PREFIX_TRIGGER,
];

/// Return the prefix portion of an ID, if it has one of the known prefixes.
#[must_use]
pub fn prefix_of(id: &str) -> Option<&'static str> {
    let (prefix, _) = id.split_once('-')?;
    ALL_PREFIXES.iter().copied().find(|p| *p == prefix)
}
