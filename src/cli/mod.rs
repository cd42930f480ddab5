//! CLI module for HouseHunter
//!
//! Provides subcommands:
//! - `score`: score a feature record, or rank several
//! - `search`: search every ZIP code of a city under a price ceiling
//! - `zip`: search a single ZIP code
//! - `lookup`: find a listing by street address and score it
//! - `batch`: run several searches and lookups against one shared cache

pub mod batch;
pub mod lookup;
pub mod score;
pub mod search;

use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// HouseHunter - House scoring and cached property discovery
#[derive(Parser)]
#[command(name = "househunter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Score a feature record read from a JSON file; an array is ranked
    Score(score::ScoreArgs),

    /// Search every ZIP code of a city
    Search(search::SearchArgs),

    /// Search a single ZIP code
    Zip(search::ZipArgs),

    /// Find a listing by street address and score it as a new house
    Lookup(lookup::LookupArgs),

    /// Run a JSON list of searches and lookups sharing one region cache
    Batch(batch::BatchArgs),
}

/// Loads `.env` and configuration, then starts logging
pub fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    logging::init_logging(&config.logging)?;

    Ok(config)
}

/// Writes a value to stdout as pretty JSON
pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Reads a whole input file; `-` reads stdin
pub(crate) async fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        use tokio::io::AsyncReadExt;

        let mut input = String::new();
        tokio::io::stdin().read_to_string(&mut input).await?;
        return Ok(input);
    }

    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}
