//! Test doubles for the fetcher and spreadsheet seams.

use crate::models::CourseRecord;
use crate::outputs::sheets::{SheetSync, SheetsError};
use crate::scrapers::fetch::{DocumentFetcher, FetchError};
use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::sync::Mutex;

/// Serves fixed documents by URL; unknown URLs answer HTTP 503.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
    pub requested: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }
}

impl DocumentFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.requested.lock().unwrap().push(url.to_string());
        self.pages.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 503,
        })
    }
}

/// Remembers every tab replacement as `(tab, record count)`.
#[derive(Debug, Default)]
pub struct RecordingSheets {
    pub calls: Mutex<Vec<(String, usize)>>,
    pub fail: bool,
}

impl SheetSync for RecordingSheets {
    async fn replace_tab(
        &self,
        tab: &str,
        records: &[CourseRecord],
        _collected_at: &DateTime<Local>,
    ) -> Result<(), SheetsError> {
        self.calls
            .lock()
            .unwrap()
            .push((tab.to_string(), records.len()));
        if self.fail {
            return Err(SheetsError::Status {
                status: 500,
                body: "backend error".to_string(),
            });
        }
        Ok(())
    }
}
