//! Search domain - city queries and the merge of per-region listings

mod merge;
mod query;
mod result;

pub use merge::{aggregate, merge_listings, RegionFetch};
pub use query::SearchQuery;
pub use result::{AggregatedResult, RegionReport, RegionStatus, SearchOutcome};
