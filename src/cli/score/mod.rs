//! Score command - scores feature records from a JSON file

use std::path::PathBuf;

use clap::Args;
use serde_json::Value;

use crate::domain::{DomainError, FeatureRecord, ScoreEngine};

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    /// JSON file holding one feature record or an array of records; `-` reads stdin
    pub file: PathBuf,
}

pub async fn run(args: ScoreArgs) -> anyhow::Result<()> {
    super::bootstrap()?;

    let input = super::read_input(&args.file).await?;
    let engine = ScoreEngine::new();

    match parse_records(&input)? {
        Records::One(record) => super::print_json(&engine.score(&record)?),
        Records::Many(records) => {
            let ranked = engine.rank(&records)?;
            tracing::info!(records = ranked.len(), "Ranked feature records");
            super::print_json(&ranked)
        }
    }
}

#[derive(Debug)]
enum Records {
    One(FeatureRecord),
    Many(Vec<FeatureRecord>),
}

fn parse_records(input: &str) -> Result<Records, DomainError> {
    let value: Value = serde_json::from_str(input)
        .map_err(|e| DomainError::validation(format!("Malformed JSON: {}", e)))?;

    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                FeatureRecord::from_json(&item.to_string()).map_err(|e| {
                    DomainError::validation(format!("Record {}: {}", index, e))
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Records::Many),
        other => Ok(Records::One(FeatureRecord::from_json(&other.to_string())?)),
    }
}
