//! Google Sheets synchronization.
//!
//! Each platform owns one tab, named after its display name. A sync replaces
//! the whole tab: the tab is created when missing, cleared, and rewritten
//! with a fixed six-column header followed by one row per course.
//!
//! Talks to the Sheets v4 REST API directly with `reqwest`, authenticating
//! with an OAuth 2 bearer token supplied through configuration.

use crate::models::CourseRecord;
use crate::utils::{sheet_timestamp, truncate_for_log};
use chrono::{DateTime, Local};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::json;
use std::future::Future;
use thiserror::Error;
use tracing::{debug, info, instrument};

pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

pub const HEADER: [&str; 6] = [
    "Nome do Curso",
    "Área de Conhecimento",
    "Requisitos",
    "Link de Inscrição",
    "Plataforma de Origem",
    "Data de Coleta",
];

/// Size of a freshly created tab.
const NEW_TAB_ROWS: u32 = 1000;
const NEW_TAB_COLUMNS: u32 = 10;

#[derive(Debug, Error)]
pub enum SheetsError {
    #[error("sheets request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("sheets API answered HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Something that can hold a platform's course table.
pub trait SheetSync: Send + Sync {
    /// Replace the contents of `tab` with the header and `records`.
    fn replace_tab(
        &self,
        tab: &str,
        records: &[CourseRecord],
        collected_at: &DateTime<Local>,
    ) -> impl Future<Output = Result<(), SheetsError>> + Send;
}

/// Build the value grid written to a tab: header first, then one row per record.
pub fn tab_rows(records: &[CourseRecord], collected_at: &DateTime<Local>) -> Vec<Vec<String>> {
    let stamp = sheet_timestamp(collected_at);
    std::iter::once(HEADER.iter().map(|h| h.to_string()).collect::<Vec<_>>())
        .chain(records.iter().map(|r| {
            vec![
                r.name.clone(),
                r.knowledge_area.clone(),
                r.requirements.clone(),
                r.enrollment_link.clone(),
                r.source_platform.clone(),
                stamp.clone(),
            ]
        }))
        .collect()
}

/// A1 range covering a whole tab. Tab names are quoted, embedded quotes doubled.
fn quoted_tab(tab: &str) -> String {
    format!("'{}'", tab.replace('\'', "''"))
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Debug, Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

/// [`SheetSync`] against one Google spreadsheet.
#[derive(Debug, Clone)]
pub struct GoogleSheets {
    client: Client,
    base_url: String,
    spreadsheet_id: String,
    token: String,
}

impl GoogleSheets {
    pub fn new(client: Client, spreadsheet_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client,
            base_url: SHEETS_API_BASE.to_string(),
            spreadsheet_id: spreadsheet_id.into(),
            token: token.into(),
        }
    }

    /// Point the client at another API root.
    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn spreadsheet_url(&self) -> String {
        format!("{}/{}", self.base_url, self.spreadsheet_id)
    }

    fn values_url(&self, range: &str) -> String {
        format!(
            "{}/values/{}",
            self.spreadsheet_url(),
            urlencoding::encode(range)
        )
    }

    async fn send(&self, request: RequestBuilder) -> Result<(), SheetsError> {
        let response = request.bearer_auth(&self.token).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(SheetsError::Status {
            status: status.as_u16(),
            body: truncate_for_log(&body, 300),
        })
    }

    /// Titles of the tabs currently in the spreadsheet.
    #[instrument(level = "debug", skip(self))]
    pub async fn tab_titles(&self) -> Result<Vec<String>, SheetsError> {
        let response = self
            .client
            .get(self.spreadsheet_url())
            .query(&[("fields", "sheets.properties.title")])
            .bearer_auth(&self.token)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SheetsError::Status {
                status: status.as_u16(),
                body: truncate_for_log(&body, 300),
            });
        }
        let meta: SpreadsheetMeta = response.json().await?;
        Ok(meta.sheets.into_iter().map(|s| s.properties.title).collect())
    }

    #[instrument(level = "info", skip(self))]
    async fn add_tab(&self, tab: &str) -> Result<(), SheetsError> {
        let body = json!({
            "requests": [{
                "addSheet": {
                    "properties": {
                        "title": tab,
                        "gridProperties": { "rowCount": NEW_TAB_ROWS, "columnCount": NEW_TAB_COLUMNS }
                    }
                }
            }]
        });
        let url = format!("{}:batchUpdate", self.spreadsheet_url());
        self.send(self.client.post(url).json(&body)).await
    }
}

impl SheetSync for GoogleSheets {
    #[instrument(level = "info", skip(self, records, collected_at), fields(count = records.len()))]
    async fn replace_tab(
        &self,
        tab: &str,
        records: &[CourseRecord],
        collected_at: &DateTime<Local>,
    ) -> Result<(), SheetsError> {
        if !self.tab_titles().await?.iter().any(|t| t == tab) {
            debug!("Tab missing; creating it");
            self.add_tab(tab).await?;
        }

        let range = quoted_tab(tab);
        let clear_url = format!("{}:clear", self.values_url(&range));
        self.send(self.client.post(clear_url).json(&json!({}))).await?;

        let anchor = format!("{range}!A1");
        let body = json!({
            "range": anchor,
            "majorDimension": "ROWS",
            "values": tab_rows(records, collected_at),
        });
        let update = self
            .client
            .put(self.values_url(&anchor))
            .query(&[("valueInputOption", "RAW")])
            .json(&body);
        self.send(update).await?;

        info!("Spreadsheet tab replaced");
        Ok(())
    }
}
