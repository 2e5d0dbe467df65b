mod alert;
mod component;
mod gear;
mod listing;
mod stack;
mod wishlist;

pub use alert::AlertCommands;
pub use component::ComponentCommands;
pub use gear::GearCommands;
pub use listing::ListingCommands;
pub use stack::StackCommands;
pub use wishlist::WishlistCommands;
