//! City search over the region cache

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use tokio::time::Instant;

use crate::domain::listing::RegionCode;
use crate::domain::region::{CacheLookup, Clock, ListingFetcher, RegionResolver, SystemClock};
use crate::domain::search::{aggregate, AggregatedResult, RegionFetch, SearchQuery};
use crate::domain::DomainError;
use crate::infrastructure::region::RegionCache;

/// Configuration for city searches
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum age of cached listings reused by a search
    pub max_age: Duration,
    /// Upper bound for a single region lookup
    pub region_timeout: Duration,
    /// Number of region lookups in flight at once
    pub max_concurrent_fetches: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_age: Duration::from_secs(30 * 24 * 3600),
            region_timeout: Duration::from_secs(20),
            max_concurrent_fetches: 4,
        }
    }
}

impl SearchConfig {
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    pub fn with_region_timeout(mut self, timeout: Duration) -> Self {
        self.region_timeout = timeout;
        self
    }

    pub fn with_max_concurrent_fetches(mut self, limit: usize) -> Self {
        self.max_concurrent_fetches = limit;
        self
    }
}

/// Searches every region of a city and merges the results.
///
/// Per-region failures and timeouts never fail the search; they are reported
/// in the result. Only invalid query parameters return an error.
#[derive(Debug)]
pub struct CitySearchAggregator<R, F, C = SystemClock>
where
    R: RegionResolver,
    F: ListingFetcher,
    C: Clock,
{
    resolver: R,
    cache: Arc<RegionCache<F, C>>,
    config: SearchConfig,
}

impl<R, F, C> CitySearchAggregator<R, F, C>
where
    R: RegionResolver,
    F: ListingFetcher,
    C: Clock,
{
    pub fn new(resolver: R, cache: Arc<RegionCache<F, C>>, config: SearchConfig) -> Self {
        Self {
            resolver,
            cache,
            config,
        }
    }

    pub fn cache(&self) -> &Arc<RegionCache<F, C>> {
        &self.cache
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub async fn search(
        &self,
        city: &str,
        state: &str,
        max_price: u64,
    ) -> Result<AggregatedResult, DomainError> {
        self.run_search(city, state, max_price, None).await
    }

    /// Like [`search`](Self::search), but regions still pending at `deadline`
    /// are reported as failed.
    pub async fn search_with_deadline(
        &self,
        city: &str,
        state: &str,
        max_price: u64,
        deadline: Instant,
    ) -> Result<AggregatedResult, DomainError> {
        self.run_search(city, state, max_price, Some(deadline)).await
    }

    /// Searches a single region with the same filtering and metadata as a city search
    #[tracing::instrument(skip(self, region), fields(region = %region))]
    pub async fn search_region(&self, region: &RegionCode, max_price: u64) -> AggregatedResult {
        let fetch = (region.clone(), self.lookup_region(region, None).await);
        let result = aggregate(vec![fetch], max_price);

        tracing::info!(
            total = result.total_count,
            outcome = ?result.outcome,
            "Region search complete"
        );
        result
    }

    #[tracing::instrument(skip(self, deadline))]
    async fn run_search(
        &self,
        city: &str,
        state: &str,
        max_price: u64,
        deadline: Option<Instant>,
    ) -> Result<AggregatedResult, DomainError> {
        let query = SearchQuery::new(city, state, max_price)?;
        let regions = self.resolve_regions(&query).await;

        if regions.is_empty() {
            tracing::info!("No regions found for city");
            return Ok(AggregatedResult::no_regions());
        }

        let limit = self.config.max_concurrent_fetches.max(1);
        let fetches: Vec<RegionFetch> = stream::iter(regions)
            .map(|region| async move {
                let result = self.lookup_region(&region, deadline).await;
                (region, result)
            })
            .buffered(limit)
            .collect()
            .await;

        let result = aggregate(fetches, query.max_price());

        tracing::info!(
            regions = result.regions.len(),
            failed = result.failed_regions().len(),
            cache_hits = result.cache_hits,
            fetches = result.fetches,
            total = result.total_count,
            outcome = ?result.outcome,
            "City search complete"
        );

        Ok(result)
    }

    /// Resolved region codes, first occurrence kept; an unknown city yields none
    async fn resolve_regions(&self, query: &SearchQuery) -> Vec<RegionCode> {
        let regions = match self.resolver.resolve(query.city(), query.state()).await {
            Ok(regions) => regions,
            Err(DomainError::NotFound { message }) => {
                tracing::info!(reason = %message, "City did not resolve to any region");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Region resolution failed");
                Vec::new()
            }
        };

        let mut unique = Vec::with_capacity(regions.len());
        for region in regions {
            if !unique.contains(&region) {
                unique.push(region);
            }
        }
        unique
    }

    async fn lookup_region(
        &self,
        region: &RegionCode,
        deadline: Option<Instant>,
    ) -> Result<CacheLookup, String> {
        let region_deadline = Instant::now() + self.config.region_timeout;
        let deadline = deadline.map_or(region_deadline, |d| d.min(region_deadline));

        let lookup = self.cache.get_or_fetch(region, self.config.max_age);

        match tokio::time::timeout_at(deadline, lookup).await {
            Ok(Ok(lookup)) => Ok(lookup),
            Ok(Err(e)) => Err(e.to_string()),
            Err(_) => {
                tracing::warn!(region = %region, "Region lookup timed out");
                Err(format!("Timed out fetching region {}", region))
            }
        }
    }
}
