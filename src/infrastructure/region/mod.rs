//! Region infrastructure - listing cache and city resolver

mod cache;
mod static_resolver;

pub use cache::{RegionCache, RegionCacheConfig};
pub use static_resolver::StaticRegionResolver;
