//! Search commands - city-wide and single ZIP code searches

use std::time::Duration;

use clap::Args;
use tokio::time::Instant;

use crate::domain::RegionCode;
use crate::HouseHunter;

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// City name, e.g. "Saint Paul"
    #[arg(long)]
    pub city: String,

    /// Two-letter state code
    #[arg(long)]
    pub state: String,

    /// Price ceiling in dollars (inclusive)
    #[arg(long)]
    pub max_price: u64,

    /// Overall time budget; regions still pending are reported as failed
    #[arg(long)]
    pub deadline_secs: Option<u64>,
}

#[derive(Args, Debug, Clone)]
pub struct ZipArgs {
    /// ZIP code (5 digits, optionally ZIP+4)
    #[arg(long)]
    pub zip: String,

    /// Price ceiling in dollars (inclusive)
    #[arg(long)]
    pub max_price: u64,
}

pub async fn run(args: SearchArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let hunter = HouseHunter::from_config(&config)?;

    let result = match args.deadline_secs {
        Some(secs) => {
            let deadline = Instant::now() + Duration::from_secs(secs);
            hunter
                .search()
                .search_with_deadline(&args.city, &args.state, args.max_price, deadline)
                .await?
        }
        None => {
            hunter
                .search()
                .search(&args.city, &args.state, args.max_price)
                .await?
        }
    };

    super::print_json(&result)
}

pub async fn run_zip(args: ZipArgs) -> anyhow::Result<()> {
    let region = RegionCode::new(args.zip)?;

    let config = super::bootstrap()?;
    let hunter = HouseHunter::from_config(&config)?;

    let result = hunter.search().search_region(&region, args.max_price).await;

    super::print_json(&result)
}
