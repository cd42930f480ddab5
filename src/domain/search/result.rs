//! Aggregated search result and per-region metadata

use serde::Serialize;

use crate::domain::listing::{PropertyListing, RegionCode};
use crate::domain::region::Provenance;

/// Overall shape of a search result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOutcome {
    /// At least one listing matched
    Found,
    /// The city resolved to no region codes
    NoRegionsFound,
    /// Regions were searched but nothing was at or under the price ceiling
    NoPropertiesUnderCeiling,
    /// Every region failed, so nothing could be searched
    AllRegionsFailed,
}

/// What happened to one region during a search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RegionStatus {
    /// Listings were obtained; `fetched` may be zero
    Searched {
        provenance: Provenance,
        fetched: usize,
        under_ceiling: usize,
    },
    /// Fetch failed or timed out; the region contributed nothing
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionReport {
    pub region: RegionCode,
    #[serde(flatten)]
    pub status: RegionStatus,
}

impl RegionReport {
    pub fn is_failed(&self) -> bool {
        matches!(self.status, RegionStatus::Failed { .. })
    }
}

/// Merged, de-duplicated, price-sorted listings plus search metadata
#[derive(Debug, Clone, Serialize)]
pub struct AggregatedResult {
    pub listings: Vec<PropertyListing>,
    pub outcome: SearchOutcome,
    pub regions: Vec<RegionReport>,
    pub cache_hits: usize,
    pub fetches: usize,
    pub total_count: usize,
}

impl AggregatedResult {
    /// Result for a city that resolved to no regions
    pub fn no_regions() -> Self {
        Self {
            listings: Vec::new(),
            outcome: SearchOutcome::NoRegionsFound,
            regions: Vec::new(),
            cache_hits: 0,
            fetches: 0,
            total_count: 0,
        }
    }

    /// Regions whose listings were obtained, including ones with zero listings
    pub fn searched_regions(&self) -> Vec<&RegionCode> {
        self.regions
            .iter()
            .filter(|report| !report.is_failed())
            .map(|report| &report.region)
            .collect()
    }

    /// Regions that could not be searched
    pub fn failed_regions(&self) -> Vec<&RegionCode> {
        self.regions
            .iter()
            .filter(|report| report.is_failed())
            .map(|report| &report.region)
            .collect()
    }

    /// Regions that were searched but returned no listings at all
    pub fn empty_regions(&self) -> Vec<&RegionCode> {
        self.regions
            .iter()
            .filter(|report| matches!(report.status, RegionStatus::Searched { fetched: 0, .. }))
            .map(|report| &report.region)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}
