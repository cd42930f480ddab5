//! Region-keyed listing cache backed by moka

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use crate::domain::listing::RegionCode;
use crate::domain::region::{
    CacheLookup, ClearScope, Clock, ListingFetcher, Provenance, RegionCacheEntry, SystemClock,
};
use crate::domain::DomainError;

/// Configuration for the region cache
#[derive(Debug, Clone)]
pub struct RegionCacheConfig {
    /// Maximum number of regions kept in memory
    pub max_capacity: u64,
}

impl Default for RegionCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 100_000,
        }
    }
}

impl RegionCacheConfig {
    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = capacity;
        self
    }
}

/// Cache of region listings in front of a rate-limited [`ListingFetcher`].
///
/// Freshness is decided per call from the caller's `max_age`, so the same
/// entry can be fresh for one caller and stale for another. Entries never
/// expire on their own; they are replaced on refresh or removed through
/// [`RegionCache::clear`] and [`RegionCache::purge_older_than`].
#[derive(Debug)]
pub struct RegionCache<F: ListingFetcher, C: Clock = SystemClock> {
    fetcher: F,
    clock: C,
    entries: Cache<RegionCode, Arc<RegionCacheEntry>>,
}

impl<F: ListingFetcher> RegionCache<F, SystemClock> {
    pub fn new(fetcher: F) -> Self {
        Self::with_config(fetcher, SystemClock, RegionCacheConfig::default())
    }
}

impl<F: ListingFetcher, C: Clock> RegionCache<F, C> {
    pub fn with_config(fetcher: F, clock: C, config: RegionCacheConfig) -> Self {
        let entries = Cache::builder().max_capacity(config.max_capacity).build();

        Self {
            fetcher,
            clock,
            entries,
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Returns the region's listings, fetching only when the entry is missing
    /// or at least `max_age` old.
    ///
    /// A permanent fetch failure is stored as an empty entry. Any other fetch
    /// failure leaves the existing entry untouched and is returned as
    /// [`DomainError::TransientFetch`].
    pub async fn get_or_fetch(
        &self,
        region: &RegionCode,
        max_age: Duration,
    ) -> Result<CacheLookup, DomainError> {
        if let Some(entry) = self.entries.get(region).await {
            let now = self.clock.now();

            if entry.is_fresh(now, max_age) {
                tracing::debug!(
                    region = %region,
                    listings = entry.listings().len(),
                    "Cache hit for region"
                );
                return Ok(CacheLookup::from_entry(&entry, Provenance::CacheHit));
            }

            tracing::debug!(
                region = %region,
                age_hours = entry.age(now).num_hours(),
                "Cached region is stale"
            );
        }

        tracing::debug!(
            region = %region,
            fetcher = self.fetcher.fetcher_name(),
            "Cache miss, fetching region listings"
        );

        let listings = match self.fetcher.fetch(region).await {
            Ok(listings) => listings,
            Err(DomainError::PermanentFetch { message, .. }) => {
                tracing::info!(region = %region, reason = %message, "Region has no listings");
                Vec::new()
            }
            Err(e) if e.is_transient() => {
                tracing::warn!(region = %region, error = %e, "Region fetch failed");
                return Err(e);
            }
            Err(e) => {
                tracing::warn!(region = %region, error = %e, "Region fetch failed");
                return Err(DomainError::transient_fetch(region.as_str(), e.to_string()));
            }
        };

        let entry = Arc::new(RegionCacheEntry::new(
            region.clone(),
            listings,
            self.clock.now(),
        ));
        self.entries.insert(region.clone(), Arc::clone(&entry)).await;

        tracing::info!(
            region = %region,
            listings = entry.listings().len(),
            "Stored region listings"
        );

        Ok(CacheLookup::from_entry(&entry, Provenance::CacheMissRefetched))
    }

    /// Current entry for a region, fresh or not
    pub async fn entry(&self, region: &RegionCode) -> Option<Arc<RegionCacheEntry>> {
        self.entries.get(region).await
    }

    /// Removes one region or every region, returning how many entries were removed
    pub async fn clear(&self, scope: ClearScope) -> usize {
        let removed = match scope {
            ClearScope::Region(region) => {
                usize::from(self.entries.remove(&region).await.is_some())
            }
            ClearScope::All => {
                let keys: Vec<Arc<RegionCode>> = self.entries.iter().map(|(key, _)| key).collect();
                self.remove_all(keys).await
            }
        };

        tracing::info!(removed, "Cleared region cache");
        removed
    }

    /// Removes every entry that is at least `age` old
    pub async fn purge_older_than(&self, age: Duration) -> usize {
        let now = self.clock.now();

        let keys: Vec<Arc<RegionCode>> = self
            .entries
            .iter()
            .filter(|(_, entry)| !entry.is_fresh(now, age))
            .map(|(key, _)| key)
            .collect();
        let removed = self.remove_all(keys).await;

        tracing::info!(
            removed,
            max_age_days = age.as_secs() / 86_400,
            "Purged old region entries"
        );
        removed
    }

    /// Number of cached regions
    pub async fn len(&self) -> u64 {
        self.entries.run_pending_tasks().await;
        self.entries.entry_count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn remove_all(&self, keys: Vec<Arc<RegionCode>>) -> usize {
        let mut removed = 0;
        for key in keys {
            if self.entries.remove(key.as_ref()).await.is_some() {
                removed += 1;
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::listing::PropertyListing;
    use crate::domain::region::{ManualClock, MockListingFetcher};

    const THIRTY_DAYS: Duration = Duration::from_secs(30 * 24 * 3600);

    fn region(code: &str) -> RegionCode {
        RegionCode::new(code).unwrap()
    }

    fn cache_with(
        fetcher: MockListingFetcher,
    ) -> (RegionCache<MockListingFetcher, Arc<ManualClock>>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::fixed());
        let cache = RegionCache::with_config(fetcher, Arc::clone(&clock), RegionCacheConfig::default());
        (cache, clock)
    }

    #[tokio::test]
    async fn test_second_lookup_within_max_age_is_a_hit() {
        let zip = region("55401");
        let fetcher =
            MockListingFetcher::new().with_listings(&zip, vec![PropertyListing::new("1 a st", 100)]);
        let (cache, clock) = cache_with(fetcher);

        let first = cache.get_or_fetch(&zip, THIRTY_DAYS).await.unwrap();
        assert_eq!(first.provenance, Provenance::CacheMissRefetched);

        clock.advance(chrono::Duration::days(29));

        let second = cache.get_or_fetch(&zip, THIRTY_DAYS).await.unwrap();
        assert_eq!(second.provenance, Provenance::CacheHit);
        assert_eq!(second.listings, first.listings);
        assert_eq!(cache.fetcher().calls_for(&zip), 1);
    }

    #[tokio::test]
    async fn test_stale_entry_is_refetched_and_replaced() {
        let zip = region("55401");
        let fetcher =
            MockListingFetcher::new().with_listings(&zip, vec![PropertyListing::new("1 a st", 100)]);
        let (cache, clock) = cache_with(fetcher);

        let first = cache.get_or_fetch(&zip, THIRTY_DAYS).await.unwrap();

        cache.fetcher().set_listings(
            &zip,
            vec![
                PropertyListing::new("2 b st", 200),
                PropertyListing::new("3 c st", 300),
            ],
        );
        clock.advance(chrono::Duration::days(30));

        let second = cache.get_or_fetch(&zip, THIRTY_DAYS).await.unwrap();
        assert_eq!(second.provenance, Provenance::CacheMissRefetched);
        assert_eq!(second.listings.len(), 2);
        assert!(second.fetched_at > first.fetched_at);
        assert_eq!(cache.fetcher().calls_for(&zip), 2);

        let stored = cache.entry(&zip).await.unwrap();
        assert_eq!(stored.listings().len(), 2);
    }

    #[tokio::test]
    async fn test_max_age_is_per_call() {
        let zip = region("55401");
        let fetcher =
            MockListingFetcher::new().with_listings(&zip, vec![PropertyListing::new("1 a st", 100)]);
        let (cache, clock) = cache_with(fetcher);

        cache.get_or_fetch(&zip, THIRTY_DAYS).await.unwrap();
        clock.advance(chrono::Duration::days(100));

        let long = Duration::from_secs(360 * 24 * 3600);
        let lookup = cache.get_or_fetch(&zip, long).await.unwrap();
        assert!(lookup.is_hit());

        let lookup = cache.get_or_fetch(&zip, THIRTY_DAYS).await.unwrap();
        assert!(!lookup.is_hit());
    }

    #[tokio::test]
    async fn test_transient_error_propagates_and_keeps_entry() {
        let zip = region("55401");
        let fetcher =
            MockListingFetcher::new().with_listings(&zip, vec![PropertyListing::new("1 a st", 100)]);
        let (cache, clock) = cache_with(fetcher);

        cache.get_or_fetch(&zip, THIRTY_DAYS).await.unwrap();
        let stored = cache.entry(&zip).await.unwrap();

        cache.fetcher().set_transient_error(&zip, "HTTP 429");
        clock.advance(chrono::Duration::days(31));

        let err = cache.get_or_fetch(&zip, THIRTY_DAYS).await.unwrap_err();
        assert!(err.is_transient());

        let kept = cache.entry(&zip).await.unwrap();
        assert!(Arc::ptr_eq(&kept, &stored));
        assert_eq!(cache.fetcher().calls_for(&zip), 2);
    }

    #[tokio::test]
    async fn test_concurrent_refreshes_do_not_block_each_other() {
        let zip = region("55401");
        let delay = Duration::from_millis(200);
        let fetcher = MockListingFetcher::new()
            .with_listings(&zip, vec![PropertyListing::new("1 a st", 100)])
            .with_delay(&zip, delay);
        let (cache, clock) = cache_with(fetcher);

        cache.get_or_fetch(&zip, THIRTY_DAYS).await.unwrap();
        cache.fetcher().set_listings(
            &zip,
            vec![
                PropertyListing::new("2 b st", 200),
                PropertyListing::new("3 c st", 300),
            ],
        );
        clock.advance(chrono::Duration::days(31));

        let started = tokio::time::Instant::now();
        let (first, second) = tokio::join!(
            cache.get_or_fetch(&zip, THIRTY_DAYS),
            cache.get_or_fetch(&zip, THIRTY_DAYS)
        );
        let elapsed = started.elapsed();

        let (first, second) = (first.unwrap(), second.unwrap());
        assert_eq!(first.provenance, Provenance::CacheMissRefetched);
        assert_eq!(second.provenance, Provenance::CacheMissRefetched);
        assert_eq!(cache.fetcher().calls_for(&zip), 3);
        assert!(elapsed < delay * 2, "refreshes ran one after another: {:?}", elapsed);

        let stored = cache.entry(&zip).await.unwrap();
        assert_eq!(stored.listings().len(), 2);
        assert!(
            Arc::ptr_eq(stored.listings(), &first.listings)
                || Arc::ptr_eq(stored.listings(), &second.listings)
        );
    }

    #[tokio::test]
    async fn test_permanent_error_is_cached_as_empty() {
        let zip = region("99999");
        let fetcher = MockListingFetcher::new().with_permanent_error(&zip, "no results");
        let (cache, _) = cache_with(fetcher);

        let first = cache.get_or_fetch(&zip, THIRTY_DAYS).await.unwrap();
        assert!(first.listings.is_empty());
        assert_eq!(first.provenance, Provenance::CacheMissRefetched);

        let second = cache.get_or_fetch(&zip, THIRTY_DAYS).await.unwrap();
        assert!(second.is_hit());
        assert_eq!(cache.fetcher().calls_for(&zip), 1);
    }

    #[tokio::test]
    async fn test_clear_region_and_all() {
        let a = region("55401");
        let b = region("55402");
        let fetcher = MockListingFetcher::new()
            .with_listings(&a, vec![PropertyListing::new("1 a st", 100)])
            .with_listings(&b, vec![PropertyListing::new("2 b st", 100)]);
        let (cache, _) = cache_with(fetcher);

        cache.get_or_fetch(&a, THIRTY_DAYS).await.unwrap();
        cache.get_or_fetch(&b, THIRTY_DAYS).await.unwrap();
        assert_eq!(cache.len().await, 2);

        assert_eq!(cache.clear(ClearScope::Region(a.clone())).await, 1);
        assert_eq!(cache.clear(ClearScope::Region(a.clone())).await, 0);
        assert!(cache.entry(&a).await.is_none());

        let lookup = cache.get_or_fetch(&a, THIRTY_DAYS).await.unwrap();
        assert!(!lookup.is_hit());

        assert_eq!(cache.clear(ClearScope::All).await, 2);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_purge_older_than() {
        let old = region("55401");
        let recent = region("55402");
        let fetcher = MockListingFetcher::new()
            .with_listings(&old, vec![PropertyListing::new("1 a st", 100)])
            .with_listings(&recent, vec![PropertyListing::new("2 b st", 100)]);
        let (cache, clock) = cache_with(fetcher);

        cache.get_or_fetch(&old, THIRTY_DAYS).await.unwrap();
        clock.advance(chrono::Duration::days(60));
        cache.get_or_fetch(&recent, THIRTY_DAYS).await.unwrap();
        clock.advance(chrono::Duration::days(40));

        let removed = cache
            .purge_older_than(Duration::from_secs(90 * 24 * 3600))
            .await;

        assert_eq!(removed, 1);
        assert!(cache.entry(&old).await.is_none());
        assert!(cache.entry(&recent).await.is_some());
    }
}
