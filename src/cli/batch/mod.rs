//! Batch command - runs several queries through one process-wide cache

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::domain::region::{ListingFetcher, RegionResolver};
use crate::domain::{AggregatedResult, DomainError, RegionCode};
use crate::infrastructure::lookup::PropertyMatch;
use crate::HouseHunter;

#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// JSON file holding an array of queries; `-` reads stdin
    pub file: PathBuf,
}

/// One query of a batch, tagged by `kind`
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BatchQuery {
    Search {
        city: String,
        state: String,
        max_price: u64,
    },
    Zip {
        zip: String,
        max_price: u64,
    },
    Lookup {
        address: String,
        zip: String,
    },
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchAnswer {
    Search { result: AggregatedResult },
    Lookup { found: Option<PropertyMatch> },
    Error { message: String },
}

#[derive(Debug, Serialize)]
pub struct BatchItem {
    pub index: usize,
    #[serde(flatten)]
    pub answer: BatchAnswer,
}

#[derive(Debug, Serialize)]
pub struct BatchOutput {
    pub results: Vec<BatchItem>,
    /// Regions held by the cache once every query ran
    pub cached_regions: u64,
}

pub async fn run(args: BatchArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    let input = super::read_input(&args.file).await?;
    let queries: Vec<BatchQuery> =
        serde_json::from_str(&input).context("Batch input must be a JSON array of queries")?;

    let hunter = HouseHunter::from_config(&config)?;
    let output = run_queries(&hunter, queries).await;

    super::print_json(&output)
}

/// Runs the queries in order; a failing query is reported and does not stop the batch
pub async fn run_queries<R, F>(hunter: &HouseHunter<R, F>, queries: Vec<BatchQuery>) -> BatchOutput
where
    R: RegionResolver,
    F: ListingFetcher,
{
    let mut results = Vec::with_capacity(queries.len());

    for (index, query) in queries.into_iter().enumerate() {
        let answer = match run_query(hunter, query).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!(index, error = %e, "Batch query failed");
                BatchAnswer::Error {
                    message: e.to_string(),
                }
            }
        };
        results.push(BatchItem { index, answer });
    }

    let cached_regions = hunter.cache().len().await;
    tracing::info!(queries = results.len(), cached_regions, "Batch finished");

    BatchOutput {
        results,
        cached_regions,
    }
}

async fn run_query<R, F>(hunter: &HouseHunter<R, F>, query: BatchQuery) -> Result<BatchAnswer, DomainError>
where
    R: RegionResolver,
    F: ListingFetcher,
{
    match query {
        BatchQuery::Search {
            city,
            state,
            max_price,
        } => {
            let result = hunter.search().search(&city, &state, max_price).await?;
            Ok(BatchAnswer::Search { result })
        }
        BatchQuery::Zip { zip, max_price } => {
            let region = RegionCode::new(zip)?;
            let result = hunter.search().search_region(&region, max_price).await;
            Ok(BatchAnswer::Search { result })
        }
        BatchQuery::Lookup { address, zip } => {
            let region = RegionCode::new(zip)?;
            let found = hunter.lookup().lookup(&address, &region).await?;
            Ok(BatchAnswer::Lookup { found })
        }
    }
}
