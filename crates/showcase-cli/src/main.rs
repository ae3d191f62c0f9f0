//! The `showcase` binary.

use anyhow::Result;
use clap::Parser;
use showcase_cli::{CliArgs, run};

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    run(args).await?;
    Ok(())
}
