//! Collection runs: scrape a platform, then persist what was found.
//!
//! A single-platform run collects, writes the CSV file and syncs the
//! platform's spreadsheet tab. The aggregate run visits every platform in
//! [`PLATFORMS`] order, one after another, writing CSV files only; a failing
//! platform is recorded in its outcome and the next one still runs.

use crate::models::{CourseRecord, PlatformOutcome};
use crate::outputs::csv::{CsvError, CsvWriter};
use crate::outputs::sheets::SheetSync;
use crate::scrapers::fetch::DocumentFetcher;
use crate::scrapers::{self, CollectError, PLATFORMS, Platform};
use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Collect(#[from] CollectError),
    #[error(transparent)]
    Csv(#[from] CsvError),
    #[error("CSV writer task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Everything a collection run needs, shared read-only across requests.
#[derive(Debug)]
pub struct Pipeline<F, S> {
    fetcher: F,
    csv: CsvWriter,
    sheets: Option<S>,
}

impl<F, S> Pipeline<F, S>
where
    F: DocumentFetcher,
    S: SheetSync,
{
    /// `sheets` is `None` when no spreadsheet is configured.
    pub fn new(fetcher: F, csv: CsvWriter, sheets: Option<S>) -> Self {
        Self {
            fetcher,
            csv,
            sheets,
        }
    }

    /// Collect one platform, write its CSV file and replace its spreadsheet tab.
    #[instrument(level = "info", skip(self, platform), fields(platform = %platform.name))]
    pub async fn run_platform(
        &self,
        platform: &'static Platform,
    ) -> Result<Vec<CourseRecord>, PipelineError> {
        let (records, collected_at) = self.collect_and_save(platform).await?;
        let sheet_synced = self.sync_sheet(platform, &records, &collected_at).await;
        info!(count = records.len(), sheet_synced, "Platform run finished");
        Ok(records)
    }

    /// Collect every platform in turn. Keys are platform slugs.
    #[instrument(level = "info", skip(self))]
    pub async fn run_all(&self) -> BTreeMap<String, PlatformOutcome> {
        let mut outcomes = BTreeMap::new();
        for platform in PLATFORMS {
            let outcome = match self.collect_and_save(platform).await {
                Ok((records, _)) => PlatformOutcome::collected(records.len()),
                Err(e) => {
                    error!(platform = %platform.name, error = %e, "Platform collection failed");
                    PlatformOutcome::failed(e.to_string())
                }
            };
            outcomes.insert(platform.slug.to_string(), outcome);
        }

        let failed = outcomes.values().filter(|o| !o.is_success()).count();
        info!(platforms = outcomes.len(), failed, "Aggregate collection finished");
        outcomes
    }

    async fn collect_and_save(
        &self,
        platform: &'static Platform,
    ) -> Result<(Vec<CourseRecord>, DateTime<Local>), PipelineError> {
        let records = scrapers::collect(&self.fetcher, platform).await?;
        let collected_at = Local::now();
        self.save_csv(platform, &records, collected_at).await?;
        Ok((records, collected_at))
    }

    async fn save_csv(
        &self,
        platform: &'static Platform,
        records: &[CourseRecord],
        collected_at: DateTime<Local>,
    ) -> Result<Option<PathBuf>, PipelineError> {
        let writer = self.csv.clone();
        let records = records.to_vec();
        let written = tokio::task::spawn_blocking(move || {
            writer.write(platform.slug, &records, &collected_at)
        })
        .await??;
        Ok(written)
    }

    /// Replace the platform's tab. Failures are logged and reported as `false`.
    async fn sync_sheet(
        &self,
        platform: &Platform,
        records: &[CourseRecord],
        collected_at: &DateTime<Local>,
    ) -> bool {
        let Some(sheets) = &self.sheets else {
            info!("Spreadsheet not configured; skipping sync");
            return false;
        };
        if records.is_empty() {
            info!("No courses to sync");
            return false;
        }
        match sheets.replace_tab(platform.name, records, collected_at).await {
            Ok(()) => true,
            Err(e) => {
                warn!(tab = platform.name, error = %e, "Spreadsheet sync failed");
                false
            }
        }
    }
}
