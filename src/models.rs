//! Data models for scraped courses and the HTTP response bodies built from them.
//!
//! This module defines the core data structures used throughout the application:
//! - [`CourseRecord`]: One normalized course listing, the only entity the scrapers produce
//! - [`CollectResponse`] / [`CollectFailure`]: Bodies of the per-platform endpoints
//! - [`AggregateResponse`] / [`PlatformOutcome`]: Body of the "all platforms" endpoint
//!
//! Serialized keys keep the Portuguese column names (`nome_curso`, `link_inscricao`, ...)
//! because both the CSV files and the JSON responses are consumed by spreadsheets and
//! scripts that already expect them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Knowledge area assigned when no keyword matches.
pub const DEFAULT_KNOWLEDGE_AREA: &str = "Geral";

/// Requirements text used when a listing says nothing about prerequisites.
pub const REQUIREMENTS_NOT_SPECIFIED: &str = "Não especificado";

/// A single course listing as collected from one platform.
///
/// Every field is populated: records without a title are never built, and the
/// optional fields fall back to [`DEFAULT_KNOWLEDGE_AREA`],
/// [`REQUIREMENTS_NOT_SPECIFIED`] and the platform listing URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// The course title, whitespace-normalized.
    #[serde(rename = "nome_curso")]
    pub name: String,
    /// Coarse subject category, e.g. "Tecnologia".
    #[serde(rename = "area_conhecimento")]
    pub knowledge_area: String,
    /// Prerequisites as published, or the "not specified" sentinel.
    #[serde(rename = "requisitos")]
    pub requirements: String,
    /// Absolute enrollment or detail URL.
    #[serde(rename = "link_inscricao")]
    pub enrollment_link: String,
    /// Display name of the platform the record came from.
    #[serde(rename = "plataforma_origem")]
    pub source_platform: String,
}

/// Successful body of `POST /api/coletar/<platform>`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CollectResponse {
    pub success: bool,
    pub message: String,
    pub cursos: Vec<CourseRecord>,
}

/// Failure body shared by every scraper endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct CollectFailure {
    pub success: bool,
    pub error: String,
}

/// Per-platform entry of the aggregate endpoint.
///
/// Serializes either as `{"success": true, "quantidade": N}` or
/// `{"success": false, "error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlatformOutcome {
    Collected { success: bool, quantidade: usize },
    Failed { success: bool, error: String },
}

impl PlatformOutcome {
    pub fn collected(quantidade: usize) -> Self {
        PlatformOutcome::Collected {
            success: true,
            quantidade,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        PlatformOutcome::Failed {
            success: false,
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PlatformOutcome::Collected { .. })
    }
}

/// Body of `POST /api/coletar/todos`, keyed by platform slug.
#[derive(Debug, Serialize, Deserialize)]
pub struct AggregateResponse {
    pub success: bool,
    pub message: String,
    pub resultados: BTreeMap<String, PlatformOutcome>,
}

impl AggregateResponse {
    pub fn completed(resultados: BTreeMap<String, PlatformOutcome>) -> Self {
        Self {
            success: true,
            message: "Coleta concluída para todas as plataformas".to_string(),
            resultados,
        }
    }
}
