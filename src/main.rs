//! Fake Job Posting Detection - Main Entry Point

use anyhow::Result;
use clap::Parser;
use fake_job_detector::cli::{self, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    cli::run(args).await
}
