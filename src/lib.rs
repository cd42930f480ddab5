//! HouseHunter
//!
//! House scoring and cached property discovery:
//! - Deterministic, itemized scoring of house features
//! - Region-keyed listing cache in front of a rate-limited listings provider
//! - City-wide search merging listings across the city's ZIP codes
//!
//! The region cache lives as long as its [`HouseHunter`]. Each CLI command
//! builds a fresh one, so reuse across queries happens inside one `batch` run
//! or in a long-lived embedder, which is also where [`HouseHunter::purge_stale`]
//! and [`RegionCache::clear`] apply.

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use domain::region::{ListingFetcher, RegionResolver, SystemClock};
use domain::{DomainError, ScoreEngine};
use infrastructure::listings::{RealtorConfig, RealtorListingFetcher, ReqwestListingsClient};
use infrastructure::lookup::PropertyLookupService;
use infrastructure::region::{RegionCache, RegionCacheConfig, StaticRegionResolver};
use infrastructure::search::{CitySearchAggregator, SearchConfig};

/// Fetcher used by the binary
pub type RealtorFetcher = RealtorListingFetcher<ReqwestListingsClient>;

/// The process-wide services, sharing one region cache
#[derive(Debug)]
pub struct HouseHunter<R = StaticRegionResolver, F = RealtorFetcher>
where
    R: RegionResolver,
    F: ListingFetcher,
{
    cache: Arc<RegionCache<F>>,
    search: CitySearchAggregator<R, F>,
    lookup: PropertyLookupService<F>,
    engine: ScoreEngine,
    purge_after: std::time::Duration,
}

impl HouseHunter {
    /// Builds the production services; the listings API key is required
    pub fn from_config(config: &AppConfig) -> Result<Self, DomainError> {
        let api_key = config
            .listings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                DomainError::configuration(
                    "Listings API key is not set (APP__LISTINGS__API_KEY)",
                )
            })?;

        let client = ReqwestListingsClient::with_timeout(config.listings.timeout())?;
        let fetcher = RealtorListingFetcher::new(
            client,
            RealtorConfig::new(api_key)
                .with_base_url(config.listings.base_url.as_str())
                .with_host(config.listings.host.as_str())
                .with_page_size(config.listings.page_size),
        );
        let resolver = StaticRegionResolver::from_config(&config.regions)?;
        if resolver.is_empty() {
            tracing::warn!("No cities configured, city searches will find no regions");
        }

        tracing::info!(
            cities = resolver.len(),
            base_url = %config.listings.base_url,
            "HouseHunter configured"
        );

        Ok(Self::from_parts(resolver, fetcher, config))
    }
}

impl<R, F> HouseHunter<R, F>
where
    R: RegionResolver,
    F: ListingFetcher,
{
    /// Wires the services around the given collaborators
    pub fn from_parts(resolver: R, fetcher: F, config: &AppConfig) -> Self {
        let cache = Arc::new(RegionCache::with_config(
            fetcher,
            SystemClock,
            RegionCacheConfig::default().with_max_capacity(config.cache.max_capacity),
        ));

        let search = CitySearchAggregator::new(
            resolver,
            Arc::clone(&cache),
            SearchConfig::default()
                .with_max_age(config.cache.search_max_age())
                .with_region_timeout(config.search.region_timeout())
                .with_max_concurrent_fetches(config.search.max_concurrent_fetches),
        );

        let lookup = PropertyLookupService::new(Arc::clone(&cache))
            .with_max_age(config.cache.lookup_max_age());

        Self {
            cache,
            search,
            lookup,
            engine: ScoreEngine::new(),
            purge_after: config.cache.purge_after(),
        }
    }

    pub fn cache(&self) -> &Arc<RegionCache<F>> {
        &self.cache
    }

    pub fn search(&self) -> &CitySearchAggregator<R, F> {
        &self.search
    }

    pub fn lookup(&self) -> &PropertyLookupService<F> {
        &self.lookup
    }

    pub fn engine(&self) -> &ScoreEngine {
        &self.engine
    }

    /// Removes cache entries past the configured purge age
    pub async fn purge_stale(&self) -> usize {
        self.cache.purge_older_than(self.purge_after).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CityRegions;
    use crate::domain::listing::{PropertyListing, RegionCode};
    use crate::domain::region::MockListingFetcher;

    #[test]
    fn test_missing_api_key_is_a_configuration_error() {
        let err = HouseHunter::from_config(&AppConfig::default()).unwrap_err();
        assert!(matches!(err, DomainError::Configuration { .. }));

        let mut config = AppConfig::default();
        config.listings.api_key = Some("  ".to_string());
        assert!(HouseHunter::from_config(&config).is_err());
    }

    #[test]
    fn test_invalid_region_table_is_rejected() {
        let mut config = AppConfig::default();
        config.listings.api_key = Some("key".to_string());
        config.regions = vec![CityRegions {
            city: "Austin".to_string(),
            state: "TX".to_string(),
            zip_codes: vec!["not-a-zip".to_string()],
        }];

        let err = HouseHunter::from_config(&config).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_from_config_with_key() {
        let mut config = AppConfig::default();
        config.listings.api_key = Some("key".to_string());

        assert!(HouseHunter::from_config(&config).is_ok());
    }

    #[tokio::test]
    async fn test_search_and_lookup_share_the_cache() {
        let zip = RegionCode::new("55104").unwrap();
        let fetcher = MockListingFetcher::new()
            .with_listings(&zip, vec![PropertyListing::new("88 selby ave", 210_000)]);
        let resolver = StaticRegionResolver::new()
            .with_city("Saint Paul", "MN", ["55104"])
            .unwrap();

        let hunter = HouseHunter::from_parts(resolver, fetcher, &AppConfig::default());

        let result = hunter.search().search("Saint Paul", "MN", 300_000).await.unwrap();
        assert_eq!(result.total_count, 1);

        let found = hunter.lookup().lookup("88 Selby Ave", &zip).await.unwrap();
        assert!(found.is_some());
        assert_eq!(hunter.cache().fetcher().total_calls(), 1);

        assert_eq!(hunter.purge_stale().await, 0);
        assert!(hunter.cache().entry(&zip).await.is_some());
    }
}
