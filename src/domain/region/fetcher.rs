//! Listing fetcher trait - the rate-limited external listings source

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::listing::{PropertyListing, RegionCode};
use crate::domain::DomainError;

/// Fetches every listing the provider knows for one region.
///
/// Implementations fail with [`DomainError::TransientFetch`] when a retry may
/// succeed, and with [`DomainError::PermanentFetch`] when the region has no data.
#[async_trait]
pub trait ListingFetcher: Send + Sync + Debug {
    async fn fetch(&self, region: &RegionCode) -> Result<Vec<PropertyListing>, DomainError>;

    /// Get the fetcher name
    fn fetcher_name(&self) -> &'static str;
}
