//! CSV output for collected courses.
//!
//! Each run writes a fresh file named `{slug}_{YYYYmmdd_HHMMSS}.csv` under the
//! data directory. Columns follow the serialized [`CourseRecord`] keys:
//!
//! ```text
//! nome_curso,area_conhecimento,requisitos,link_inscricao,plataforma_origem
//! ```
//!
//! Earlier files are never touched; deduplication across runs is left to
//! whoever consumes the directory.

use crate::models::CourseRecord;
use crate::utils::file_timestamp;
use chrono::{DateTime, Local};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("cannot prepare {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Writes course lists into timestamped CSV files.
#[derive(Debug, Clone)]
pub struct CsvWriter {
    data_dir: PathBuf,
}

impl CsvWriter {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Write `records` for the platform `slug`.
    ///
    /// Returns the written path, or `None` without touching the disk when
    /// `records` is empty.
    #[instrument(level = "info", skip(self, records, at), fields(count = records.len()))]
    pub fn write(
        &self,
        slug: &str,
        records: &[CourseRecord],
        at: &DateTime<Local>,
    ) -> Result<Option<PathBuf>, CsvError> {
        if records.is_empty() {
            info!("No courses collected; skipping CSV");
            return Ok(None);
        }

        fs::create_dir_all(&self.data_dir).map_err(|source| CsvError::Io {
            path: self.data_dir.clone(),
            source,
        })?;

        let path = self
            .data_dir
            .join(format!("{}_{}.csv", slug, file_timestamp(at)));
        let csv_error = |source| CsvError::Csv {
            path: path.clone(),
            source,
        };

        let mut writer = csv::Writer::from_path(&path).map_err(csv_error)?;
        for record in records {
            writer.serialize(record).map_err(csv_error)?;
        }
        writer.flush().map_err(|e| csv_error(e.into()))?;

        info!(path = %path.display(), "Wrote CSV file");
        Ok(Some(path))
    }
}
