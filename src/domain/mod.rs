//! Domain layer - Core business logic and entities

pub mod error;
pub mod listing;
pub mod region;
pub mod scoring;
pub mod search;

pub use error::DomainError;
pub use listing::{PropertyListing, RegionCode};
pub use region::{
    CacheLookup, ClearScope, Clock, ListingFetcher, Provenance, RegionCacheEntry, RegionResolver,
    SystemClock,
};
pub use scoring::{FeatureRecord, ScoreBreakdown, ScoreCategory, ScoreEngine};
pub use search::{AggregatedResult, SearchOutcome, SearchQuery};
