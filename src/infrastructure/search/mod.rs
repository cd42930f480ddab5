//! Search infrastructure - city-wide aggregation over the region cache

mod aggregator;

pub use aggregator::{CitySearchAggregator, SearchConfig};
