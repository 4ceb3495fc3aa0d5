//! Command line entry points

use crate::config::{AppConfig, LoggingConfig, DEFAULT_CONFIG_PATH};
use crate::pipeline::Pipeline;
use crate::server::{self, state::AppState};
use crate::text::normalizer::TextNormalizer;
use crate::text::resources::LinguisticResources;
use crate::types::JobPosting;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "fake-job-detector", version)]
#[command(about = "Flags fraudulent job postings with a pre-trained text classifier")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to config TOML (optional file; FAKEJOB__* env vars override it)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load artifacts and serve the HTTP API (default)
    Serve,
    /// Print the cleaned form of a text
    Clean { text: String },
    /// Score one job posting read from a JSON file
    Predict {
        #[arg(long)]
        input: PathBuf,
    },
}

pub async fn run(args: Cli) -> Result<()> {
    let config = AppConfig::load_from_path(&args.config)?;
    init_logging(&config.logging)?;

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&config).await,
        Command::Clean { text } => {
            let resources = LinguisticResources::load(&config.nlp, None::<Vec<&str>>)?;
            let normalizer = TextNormalizer::new(resources)?;
            println!("{}", normalizer.normalize(&text));
            Ok(())
        }
        Command::Predict { input } => {
            let raw = std::fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let job: JobPosting = serde_json::from_str(&raw)
                .with_context(|| format!("Invalid job posting in {}", input.display()))?;

            let pipeline = Pipeline::load(&config)?;
            let result = pipeline.predict(&job)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
    }
}

async fn serve(config: &AppConfig) -> Result<()> {
    info!("Starting Fake Job Posting Detection API");
    info!(
        dir = %config.artifacts.dir.display(),
        classifier = %config.artifacts.classifier,
        "Loading model and preprocessing components"
    );

    let pipeline = Pipeline::load(config)?;
    server::listen(config, AppState::new(pipeline)).await
}

/// `RUST_LOG` wins over the configured level
fn init_logging(logging: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(format!("fake_job_detector={}", logging.level))
            .context("Invalid logging.level")?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match logging.format.as_str() {
        "json" => builder.json().init(),
        _ => builder.init(),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_serve() {
        let cli = Cli::try_parse_from(["fake-job-detector"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_PATH));
    }

    #[test]
    fn test_parses_subcommands() {
        let cli = Cli::try_parse_from([
            "fake-job-detector",
            "predict",
            "--input",
            "posting.json",
            "--config",
            "alt.toml",
        ])
        .unwrap();

        assert!(matches!(cli.command, Some(Command::Predict { ref input }) if input == &PathBuf::from("posting.json")));
        assert_eq!(cli.config, PathBuf::from("alt.toml"));

        let cli = Cli::try_parse_from(["fake-job-detector", "clean", "Hello, World!"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Clean { ref text }) if text == "Hello, World!"));
    }
}
