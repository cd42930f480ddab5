//! Merge, de-duplication and ordering of per-region listings

use std::collections::HashSet;

use super::result::{AggregatedResult, RegionReport, RegionStatus, SearchOutcome};
use crate::domain::listing::{PropertyListing, RegionCode};
use crate::domain::region::{CacheLookup, Provenance};

/// Outcome of one region lookup as seen by the aggregator
pub type RegionFetch = (RegionCode, Result<CacheLookup, String>);

/// Filters by price ceiling, merges in input order, drops repeated addresses
/// (first occurrence wins) and sorts by ascending price, keeping merge order
/// for equal prices.
pub fn merge_listings<'a, I>(region_listings: I, max_price: u64) -> Vec<PropertyListing>
where
    I: IntoIterator<Item = &'a [PropertyListing]>,
{
    let mut seen = HashSet::new();

    let mut merged: Vec<PropertyListing> = region_listings
        .into_iter()
        .flat_map(|listings| listings.iter())
        .filter(|listing| listing.price <= max_price)
        .filter(|listing| seen.insert(listing.dedup_key()))
        .cloned()
        .collect();

    merged.sort_by_key(|listing| listing.price);
    merged
}

/// Builds the aggregated result from per-region lookups, in resolution order
pub fn aggregate(fetches: Vec<RegionFetch>, max_price: u64) -> AggregatedResult {
    if fetches.is_empty() {
        return AggregatedResult::no_regions();
    }

    let mut regions = Vec::with_capacity(fetches.len());
    let mut found = Vec::with_capacity(fetches.len());
    let (mut cache_hits, mut refetches) = (0, 0);

    for (region, result) in fetches {
        let status = match result {
            Ok(lookup) => {
                match lookup.provenance {
                    Provenance::CacheHit => cache_hits += 1,
                    Provenance::CacheMissRefetched => refetches += 1,
                }

                let under_ceiling = lookup
                    .listings
                    .iter()
                    .filter(|listing| listing.price <= max_price)
                    .count();
                let status = RegionStatus::Searched {
                    provenance: lookup.provenance,
                    fetched: lookup.listings.len(),
                    under_ceiling,
                };

                found.push(lookup.listings);
                status
            }
            Err(reason) => RegionStatus::Failed { reason },
        };

        regions.push(RegionReport { region, status });
    }

    let listings = merge_listings(found.iter().map(|listings| listings.as_slice()), max_price);

    let outcome = if !listings.is_empty() {
        SearchOutcome::Found
    } else if regions.iter().all(RegionReport::is_failed) {
        SearchOutcome::AllRegionsFailed
    } else {
        SearchOutcome::NoPropertiesUnderCeiling
    };

    AggregatedResult {
        total_count: listings.len(),
        listings,
        outcome,
        regions,
        cache_hits,
        fetches: refetches,
    }
}
