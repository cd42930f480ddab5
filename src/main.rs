use clap::Parser;
use househunter::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Score(args) => cli::score::run(args).await,
        Command::Search(args) => cli::search::run(args).await,
        Command::Zip(args) => cli::search::run_zip(args).await,
        Command::Lookup(args) => cli::lookup::run(args).await,
        Command::Batch(args) => cli::batch::run(args).await,
    }
}
