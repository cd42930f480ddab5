//! Region cache entry and lookup types

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::listing::{PropertyListing, RegionCode};

/// Where the listings of a lookup came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Served from a fresh cache entry, no fetch happened
    CacheHit,
    /// Missing or stale entry, fetched and stored again
    CacheMissRefetched,
}

/// Listings stored for one region, replaced wholesale on refresh
#[derive(Debug, Clone)]
pub struct RegionCacheEntry {
    region: RegionCode,
    listings: Arc<Vec<PropertyListing>>,
    fetched_at: DateTime<Utc>,
}

impl RegionCacheEntry {
    pub fn new(region: RegionCode, listings: Vec<PropertyListing>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            region,
            listings: Arc::new(listings),
            fetched_at,
        }
    }

    pub fn region(&self) -> &RegionCode {
        &self.region
    }

    pub fn listings(&self) -> &Arc<Vec<PropertyListing>> {
        &self.listings
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Time elapsed since the fetch; zero if the clock moved backwards
    pub fn age(&self, now: DateTime<Utc>) -> TimeDelta {
        (now - self.fetched_at).max(TimeDelta::zero())
    }

    /// An entry is fresh while its age is strictly below `max_age`
    pub fn is_fresh(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        let max_age = TimeDelta::from_std(max_age).unwrap_or(TimeDelta::MAX);
        self.age(now) < max_age
    }
}

/// Result of a cache lookup
#[derive(Debug, Clone)]
pub struct CacheLookup {
    pub listings: Arc<Vec<PropertyListing>>,
    pub provenance: Provenance,
    pub fetched_at: DateTime<Utc>,
}

impl CacheLookup {
    pub fn from_entry(entry: &RegionCacheEntry, provenance: Provenance) -> Self {
        Self {
            listings: Arc::clone(entry.listings()),
            provenance,
            fetched_at: entry.fetched_at(),
        }
    }

    pub fn is_hit(&self) -> bool {
        self.provenance == Provenance::CacheHit
    }
}

/// Scope of an administrative cache clear
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClearScope {
    Region(RegionCode),
    All,
}
