//! Listing domain - property snapshots returned by the listings provider

mod address;
mod entity;

pub use address::{normalize_address, street_key, street_matches};
pub use entity::{PropertyListing, RegionCode};
