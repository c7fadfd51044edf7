//! CLI binary for brokersum.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `SummarizeConfig` and prints the display-schema JSON. Fatal errors are
//! rendered as the same `{"error": ...}` object the library's display
//! contract promises, so scripted callers always get one JSON shape.

use anyhow::{Context, Result};
use brokersum::{error_object, summarize, SummarizeConfig, SummarySet};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "brokersum",
    version,
    about = "Summarize a brokerage statement into per-topic plain-text digests"
)]
struct Cli {
    /// Path to the statement PDF.
    input: PathBuf,

    /// Inference model identifier or ARN (Llama family).
    #[arg(long, env = "BEDROCK_MODEL_ID")]
    model: Option<String>,

    /// Service region.
    #[arg(long, env = "AWS_BEDROCK_REGION")]
    region: Option<String>,

    /// Per-call timeout in seconds.
    #[arg(long, default_value_t = 60)]
    timeout: u64,

    /// Print summaries as plain text sections instead of JSON.
    #[arg(long)]
    text: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut builder = SummarizeConfig::builder().api_timeout_secs(cli.timeout);
    if let Some(model) = cli.model {
        builder = builder.model_id(model);
    }
    if let Some(region) = cli.region {
        builder = builder.region(region);
    }
    let config = builder.build().context("invalid configuration")?;

    match summarize(&cli.input, &config).await {
        Ok(set) => {
            if cli.text {
                print_text(&set);
            } else {
                println!("{}", serde_json::to_string_pretty(&set.to_display_map())?);
            }
            Ok(())
        }
        Err(e) => {
            println!("{}", serde_json::to_string_pretty(&error_object(&e.to_string()))?);
            std::process::exit(1);
        }
    }
}

fn print_text(set: &SummarySet) {
    for summary in &set.summaries {
        println!("{}", summary.title);
        println!("{}", "-".repeat(summary.title.len()));
        println!("{}\n", summary.body);
    }
}
