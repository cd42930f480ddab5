//! Street address lookup over cached region listings

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::domain::listing::{street_key, street_matches, PropertyListing, RegionCode};
use crate::domain::region::{Clock, ListingFetcher, Provenance, SystemClock};
use crate::domain::DomainError;
use crate::infrastructure::region::RegionCache;

/// Default reuse window for address lookups
pub const DEFAULT_LOOKUP_MAX_AGE: Duration = Duration::from_secs(360 * 24 * 3600);

/// A listing matched to a caller-supplied address
#[derive(Debug, Clone, Serialize)]
pub struct PropertyMatch {
    /// Address exactly as the caller gave it
    pub address: String,
    pub listing: PropertyListing,
    pub provenance: Provenance,
}

/// Finds a single property by street address within a region
#[derive(Debug)]
pub struct PropertyLookupService<F: ListingFetcher, C: Clock = SystemClock> {
    cache: Arc<RegionCache<F, C>>,
    max_age: Duration,
}

impl<F: ListingFetcher, C: Clock> PropertyLookupService<F, C> {
    pub fn new(cache: Arc<RegionCache<F, C>>) -> Self {
        Self {
            cache,
            max_age: DEFAULT_LOOKUP_MAX_AGE,
        }
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Returns the first listing in the region whose address contains, or is
    /// contained in, the street part of `address`.
    ///
    /// Fetch failures are returned as errors; no match is `Ok(None)`.
    #[tracing::instrument(skip(self, region), fields(region = %region))]
    pub async fn lookup(
        &self,
        address: &str,
        region: &RegionCode,
    ) -> Result<Option<PropertyMatch>, DomainError> {
        let key = street_key(address);
        if key.is_empty() {
            return Err(DomainError::validation(format!(
                "Address '{}' has no street part",
                address
            )));
        }

        let lookup = self.cache.get_or_fetch(region, self.max_age).await?;

        let found = lookup
            .listings
            .iter()
            .find(|listing| street_matches(&key, &listing.address))
            .cloned();

        match &found {
            Some(listing) => tracing::debug!(street = %key, matched = %listing.address, "Address matched"),
            None => tracing::debug!(street = %key, "No listing matched address"),
        }

        Ok(found.map(|listing| PropertyMatch {
            address: address.to_string(),
            listing,
            provenance: lookup.provenance,
        }))
    }
}
