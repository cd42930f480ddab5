//! Region domain - collaborators and cache types for region-keyed listing lookups

mod cache;
mod clock;
mod fetcher;
mod resolver;

pub use cache::{CacheLookup, ClearScope, Provenance, RegionCacheEntry};
pub use clock::{Clock, SystemClock};
pub use fetcher::ListingFetcher;
pub use resolver::RegionResolver;

#[cfg(test)]
pub use clock::mock::ManualClock;
#[cfg(test)]
pub use fetcher::mock::MockListingFetcher;
#[cfg(test)]
pub use resolver::MockRegionResolver;
