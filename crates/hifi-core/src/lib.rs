//! # hifi-core
//!
//! Core types and pure logic for HiFinder.
//!
//! This crate provides the foundational types shared across all HiFinder crates:
//! - Entity structs for catalog components, used listings and user collections
//! - Status enums with state machine transitions
//! - ID prefix constants
//! - Cross-cutting error types
//! - Recommendation scoring and the budget-driven recommendation engine
//! - Marketplace title parsing and catalog matching for scraped listings
//! - CLI response types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod grades;
pub mod ids;
pub mod listing_parse;
pub mod matcher;
pub mod recommend;
pub mod responses;
pub mod scoring;
