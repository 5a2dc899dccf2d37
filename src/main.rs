use anyhow::Context;
use clap::Parser;
use ncs_dashboard::cli::{run, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run(cli).await.context("ncs-dashboard failed")
}
