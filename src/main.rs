//! # Cursos Gratuitos
//!
//! Collects free-course listings from Brazilian education portals, normalizes
//! them into one record shape, and publishes them as CSV files, Google Sheets
//! tabs, and a small HTTP API.
//!
//! ## Features
//!
//! - Scrapes Google Ateliê Digital, SENAI, Gov.br (Escola Virtual de Governo)
//!   and CIEE with one declarative selector table per portal
//! - Classifies each course into a knowledge area by keyword
//! - Writes a timestamped CSV file per collection run
//! - Optionally replaces one spreadsheet tab per platform
//! - Ships a boilerplate example API alongside the scraper API
//!
//! ## Usage
//!
//! ```sh
//! cursos_gratuitos serve --bind 0.0.0.0:5000
//! cursos_gratuitos collect all
//! cursos_gratuitos example
//! ```
//!
//! ## Architecture
//!
//! 1. **Fetching**: Download a platform's listing page (single attempt, fixed timeout)
//! 2. **Extraction**: Locate course cards and build normalized records
//! 3. **Output**: Write CSV and sync the spreadsheet tab
//! 4. **Serving**: Expose each run through `POST /api/coletar/...`

use clap::Parser;
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod example;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
#[cfg(test)]
mod testing;
mod utils;

use cli::{Cli, Command, Settings};
use models::AggregateResponse;
use outputs::csv::CsvWriter;
use outputs::sheets::GoogleSheets;
use pipeline::Pipeline;
use scrapers::fetch::HttpFetcher;
use utils::ensure_writable_dir;

type LivePipeline = Pipeline<HttpFetcher, GoogleSheets>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("cursos_gratuitos starting up");

    let args = Cli::parse();
    debug!(data_dir = %args.settings.data_dir, command = ?args.command, "Parsed CLI arguments");

    match args.command {
        Command::Serve { bind } => {
            let pipeline = build_pipeline(&args.settings).await?;
            api::serve(bind, api::router(Arc::new(pipeline))).await?;
        }
        Command::Example { bind } => {
            api::serve(bind, example::router()).await?;
        }
        Command::Collect { platform } => {
            let pipeline = build_pipeline(&args.settings).await?;
            run_collect(&pipeline, &platform).await?;
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}

/// Wire the HTTP fetcher, CSV writer and (when configured) spreadsheet client.
#[instrument(level = "info", skip_all)]
async fn build_pipeline(settings: &Settings) -> Result<LivePipeline, Box<dyn Error>> {
    if let Err(e) = ensure_writable_dir(&settings.data_dir).await {
        error!(
            path = %settings.data_dir,
            error = %e,
            "Data directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let timeout = Duration::from_secs(settings.timeout_secs);
    let fetcher = HttpFetcher::new(timeout)?;

    let sheets = match (&settings.spreadsheet_id, &settings.sheets_token) {
        (Some(id), Some(token)) => {
            let client = reqwest::Client::builder().timeout(timeout).build()?;
            info!(spreadsheet_id = %id, "Spreadsheet sync enabled");
            Some(GoogleSheets::new(client, id.clone(), token.clone()))
        }
        (Some(_), None) | (None, Some(_)) => {
            info!("Spreadsheet sync needs both SPREADSHEET_ID and GOOGLE_SHEETS_TOKEN; disabled");
            None
        }
        (None, None) => None,
    };

    Ok(Pipeline::new(
        fetcher,
        CsvWriter::new(&settings.data_dir),
        sheets,
    ))
}

/// One-shot collection from the command line; prints the JSON response body.
async fn run_collect(pipeline: &LivePipeline, target: &str) -> Result<(), Box<dyn Error>> {
    if target.eq_ignore_ascii_case("all") || target.eq_ignore_ascii_case("todos") {
        let response = AggregateResponse::completed(pipeline.run_all().await);
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    let platform = scrapers::find(target)
        .ok_or_else(|| format!("unknown platform `{target}`"))?;
    let records = pipeline.run_platform(platform).await?;
    info!(platform = %platform.name, count = records.len(), "Collection finished");
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}
