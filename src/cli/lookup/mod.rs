//! Lookup command - finds a listing by address and scores it as a new house

use clap::Args;
use serde::Serialize;

use crate::domain::{FeatureRecord, RegionCode, ScoreBreakdown};
use crate::infrastructure::lookup::PropertyMatch;
use crate::HouseHunter;

#[derive(Args, Debug, Clone)]
pub struct LookupArgs {
    /// Street address, optionally followed by city, state and ZIP
    #[arg(long)]
    pub address: String,

    /// ZIP code the property is in
    #[arg(long)]
    pub zip: String,
}

/// A matched listing with the record it promotes to and that record's score
#[derive(Debug, Serialize)]
struct LookupOutput {
    #[serde(flatten)]
    found: PropertyMatch,
    features: FeatureRecord,
    score: ScoreBreakdown,
}

pub async fn run(args: LookupArgs) -> anyhow::Result<()> {
    let region = RegionCode::new(args.zip)?;

    let config = super::bootstrap()?;
    let hunter = HouseHunter::from_config(&config)?;

    let Some(found) = hunter.lookup().lookup(&args.address, &region).await? else {
        anyhow::bail!("No listing matching '{}' in {}", args.address, region);
    };

    let features = FeatureRecord::from_listing(&found.listing);
    let score = hunter.engine().score(&features)?;

    super::print_json(&LookupOutput {
        found,
        features,
        score,
    })
}
