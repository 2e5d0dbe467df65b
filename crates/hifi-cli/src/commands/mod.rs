pub mod alert;
pub mod component;
pub mod dispatch;
pub mod gear;
pub mod init;
pub mod listing;
pub mod recommend;
pub mod schema;
pub mod shared;
pub mod stack;
pub mod stats;
pub mod wishlist;
