//! Entity structs for all HiFinder domain objects.
//!
//! Each entity maps to a table in the libSQL database (see `hifi-db/migrations`).
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON roundtrip
//! and schema validation.

mod alert;
mod component;
mod gear;
mod listing;
mod stack;
mod wishlist;

pub use alert::{AlertTrigger, EXACT_TOLERANCE, NewAlert, PriceAlert, validate_alert_prices};
pub use component::{Component, NewComponent};
pub use gear::{NewGear, UserGear};
pub use listing::{NewListing, UsedListing};
pub use stack::{StackMember, UserStack};
pub use wishlist::WishlistItem;
