//! Course scrapers for the supported education portals.
//!
//! Every portal is described by one declarative [`Platform`] table and
//! handled by the same generic routine, [`collect`]:
//!
//! 1. **Fetching**: download the listing page once through a [`DocumentFetcher`]
//! 2. **Extraction**: locate candidate cards and build one record per card
//!    (see [`extract`])
//!
//! # Supported Sources
//!
//! | Source | Module | Route | Notes |
//! |--------|--------|-------|-------|
//! | Google Ateliê Digital | [`google_atelie`] | `google-atelie` | `data-testid` cards |
//! | SENAI | [`senai`] | `senai` | Free online catalog |
//! | Gov.br | [`gov_br`] | `gov-br` | Escola Virtual de Governo |
//! | CIEE | [`ciee`] | `ciee` | Youth-employment portal |
//!
//! Adding a portal means adding a module with a `PLATFORM` table and listing
//! it in [`PLATFORMS`].

pub mod ciee;
pub mod classify;
pub mod extract;
pub mod fetch;
pub mod gov_br;
pub mod google_atelie;
pub mod senai;

use crate::models::CourseRecord;
use extract::Extractor;
use fetch::{DocumentFetcher, FetchError};
use thiserror::Error;
use tracing::{info, instrument};
use url::Url;

/// Selector tables and identity of one course portal.
///
/// Selector lists are in priority order.
#[derive(Debug, Clone, Copy)]
pub struct Platform {
    /// Display name, used as `plataforma_origem` and as the spreadsheet tab.
    pub name: &'static str,
    /// File-name and JSON key, e.g. `gov_br`.
    pub slug: &'static str,
    /// Path segment under `/api/coletar/`, e.g. `gov-br`.
    pub route: &'static str,
    /// Listing page; also the base for relative links and the default link.
    pub url: &'static str,
    /// Extra class token accepted by the fallback container scan.
    pub keyword: &'static str,
    pub candidates: &'static [&'static str],
    pub titles: &'static [&'static str],
    pub descriptions: &'static [&'static str],
    pub requirements: &'static [&'static str],
}

/// Every supported platform, in aggregate-collection order.
pub static PLATFORMS: [&Platform; 4] = [
    &google_atelie::PLATFORM,
    &senai::PLATFORM,
    &gov_br::PLATFORM,
    &ciee::PLATFORM,
];

/// Look a platform up by route (`gov-br`) or slug (`gov_br`).
pub fn find(name: &str) -> Option<&'static Platform> {
    PLATFORMS
        .iter()
        .copied()
        .find(|p| p.route.eq_ignore_ascii_case(name) || p.slug.eq_ignore_ascii_case(name))
}

/// Why a platform produced no course list.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("invalid listing URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },
}

/// Collect every course currently listed by `platform`.
///
/// An empty vector means the page was fetched and parsed but lists no
/// recognizable course; a failed download is an `Err`.
#[instrument(level = "info", skip(fetcher, platform), fields(platform = %platform.name))]
pub async fn collect<F: DocumentFetcher>(
    fetcher: &F,
    platform: &Platform,
) -> Result<Vec<CourseRecord>, CollectError> {
    let base = Url::parse(platform.url)?;
    let extractor = Extractor::new(platform, base)?;

    info!(url = platform.url, "Starting course collection");
    let html = fetcher.fetch(platform.url).await?;
    let extraction = extractor.extract(&html);

    info!(
        candidates = extraction.candidates,
        collected = extraction.records.len(),
        skipped = extraction.skipped,
        "Collected courses"
    );
    Ok(extraction.records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StaticFetcher;

    #[test]
    fn test_find_by_route_and_slug() {
        assert_eq!(find("gov-br").map(|p| p.name), Some("Gov.br"));
        assert_eq!(find("gov_br").map(|p| p.name), Some("Gov.br"));
        assert_eq!(find("Google-Atelie").map(|p| p.slug), Some("google_atelie"));
        assert!(find("todos").is_none());
    }

    #[test]
    fn test_platform_identities_are_unique() {
        for (i, a) in PLATFORMS.iter().enumerate() {
            for b in &PLATFORMS[i + 1..] {
                assert_ne!(a.slug, b.slug);
                assert_ne!(a.route, b.route);
                assert_ne!(a.name, b.name);
            }
            assert!(Url::parse(a.url).is_ok());
        }
    }

    #[tokio::test]
    async fn test_collect_extracts_records_from_fetched_page() {
        let fetcher = StaticFetcher::default().with_page(
            senai::PLATFORM.url,
            r#"<div class="card-curso"><h2>Lógica de Programação</h2><a href="/curso/logica">Ver</a></div>"#,
        );
        let records = collect(&fetcher, &senai::PLATFORM).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Lógica de Programação");
        assert_eq!(records[0].knowledge_area, "Tecnologia");
        assert_eq!(
            records[0].enrollment_link,
            "https://www.senaicursosonline.com.br/curso/logica"
        );
        assert_eq!(records[0].source_platform, "SENAI");
    }

    #[tokio::test]
    async fn test_collect_empty_page_is_ok_and_empty() {
        let fetcher = StaticFetcher::default().with_page(ciee::PLATFORM.url, "<html></html>");
        let records = collect(&fetcher, &ciee::PLATFORM).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_collect_fetch_failure_is_an_error() {
        let fetcher = StaticFetcher::default();
        let err = collect(&fetcher, &gov_br::PLATFORM).await.unwrap_err();
        assert!(matches!(err, CollectError::Fetch(FetchError::Status { status: 503, .. })));
        assert_eq!(*fetcher.requested.lock().unwrap(), vec![gov_br::PLATFORM.url.to_string()]);
    }
}
