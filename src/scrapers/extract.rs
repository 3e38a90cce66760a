//! Course extraction from a parsed listing page.
//!
//! Extraction runs in two steps:
//!
//! 1. **Locate** candidate elements: the platform's candidate selectors are
//!    tried in order and the first selector with at least one match wins.
//!    When none match, every `div[class]` whose class tokens include one of
//!    [`FALLBACK_CLASS_TOKENS`] (or the platform keyword) is kept instead.
//! 2. **Assemble** one [`CourseRecord`] per candidate from four independent
//!    field extractors. A candidate without a title is skipped; the others
//!    are unaffected.
//!
//! Every field extractor follows the same rule: walk its selectors in
//! priority order, look at the first element each selector matches, and
//! return the first acceptable text.

use super::classify::classify;
use super::{CollectError, Platform};
use crate::models::{CourseRecord, REQUIREMENTS_NOT_SPECIFIED};
use crate::utils::normalize_text;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

/// Class tokens that mark a generic container as a course card.
pub const FALLBACK_CLASS_TOKENS: &[&str] = &["curso", "course", "card", "item"];

/// Anchor texts shorter than this are never used as a title.
pub const MIN_LINK_TITLE_CHARS: usize = 5;

/// Descriptions must be longer than this to be accepted.
pub const MIN_DESCRIPTION_CHARS: usize = 10;

/// Why a candidate element produced no record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("no title found in candidate")]
    MissingTitle,
}

/// Result of one extraction pass over a document.
#[derive(Debug, Default)]
pub struct Extraction {
    /// Records in candidate order.
    pub records: Vec<CourseRecord>,
    /// Number of candidate elements located.
    pub candidates: usize,
    /// Candidates that yielded no record.
    pub skipped: usize,
}

/// An ordered list of compiled selectors.
#[derive(Debug)]
struct SelectorChain(Vec<Selector>);

impl SelectorChain {
    fn compile(selectors: &[&str]) -> Result<Self, CollectError> {
        selectors
            .iter()
            .map(|css| compile(css))
            .collect::<Result<Vec<_>, _>>()
            .map(SelectorChain)
    }

    /// Normalized text of the first element matched by the first selector
    /// whose match satisfies `accept`.
    fn first_text(&self, element: ElementRef<'_>, accept: impl Fn(&str) -> bool) -> Option<String> {
        self.0.iter().find_map(|selector| {
            let text = element_text(element.select(selector).next()?);
            accept(&text).then_some(text)
        })
    }
}

fn compile(css: &str) -> Result<Selector, CollectError> {
    Selector::parse(css).map_err(|e| CollectError::Selector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

fn element_text(element: ElementRef<'_>) -> String {
    normalize_text(&element.text().collect::<Vec<_>>().join(" "))
}

/// Compiled form of a [`Platform`] table bound to the listing's base URL.
#[derive(Debug)]
pub struct Extractor<'p> {
    platform: &'p Platform,
    base: Url,
    candidates: SelectorChain,
    titles: SelectorChain,
    descriptions: SelectorChain,
    requirements: SelectorChain,
    anchors: Selector,
    containers: Selector,
}

impl<'p> Extractor<'p> {
    /// Compile every selector of `platform`. Relative links are resolved against `base`.
    pub fn new(platform: &'p Platform, base: Url) -> Result<Self, CollectError> {
        Ok(Self {
            platform,
            base,
            candidates: SelectorChain::compile(platform.candidates)?,
            titles: SelectorChain::compile(platform.titles)?,
            descriptions: SelectorChain::compile(platform.descriptions)?,
            requirements: SelectorChain::compile(platform.requirements)?,
            anchors: compile("a")?,
            containers: compile("div[class]")?,
        })
    }

    /// Parse `html` and extract every course it lists.
    #[instrument(level = "debug", skip_all, fields(platform = %self.platform.name, bytes = html.len()))]
    pub fn extract(&self, html: &str) -> Extraction {
        let document = Html::parse_document(html);
        let candidates = self.locate(&document);

        let mut extraction = Extraction {
            candidates: candidates.len(),
            ..Extraction::default()
        };
        for (index, candidate) in candidates.into_iter().enumerate() {
            match self.assemble(candidate) {
                Ok(record) => extraction.records.push(record),
                Err(reason) => {
                    debug!(index, %reason, "Skipping candidate");
                    extraction.skipped += 1;
                }
            }
        }
        extraction
    }

    /// Candidate course elements in document order.
    pub fn locate<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        for selector in &self.candidates.0 {
            let found: Vec<_> = document.select(selector).collect();
            if !found.is_empty() {
                return found;
            }
        }

        debug!("No candidate selector matched; scanning class tokens");
        document
            .select(&self.containers)
            .filter(|div| {
                div.value().classes().any(|class| {
                    FALLBACK_CLASS_TOKENS
                        .iter()
                        .chain(std::iter::once(&self.platform.keyword))
                        .any(|token| class.eq_ignore_ascii_case(token))
                })
            })
            .collect()
    }

    /// Build a record from one candidate element.
    pub fn assemble(&self, candidate: ElementRef<'_>) -> Result<CourseRecord, SkipReason> {
        let name = self.title(candidate).ok_or(SkipReason::MissingTitle)?;
        let description = self.description(candidate);

        Ok(CourseRecord {
            knowledge_area: classify(&name, &description).to_string(),
            name,
            requirements: self
                .requirements(candidate)
                .unwrap_or_else(|| REQUIREMENTS_NOT_SPECIFIED.to_string()),
            enrollment_link: self
                .link(candidate)
                .unwrap_or_else(|| self.base.as_str().to_string()),
            source_platform: self.platform.name.to_string(),
        })
    }

    /// Heading or title-like text, else the first anchor text of at least
    /// [`MIN_LINK_TITLE_CHARS`] characters.
    pub fn title(&self, candidate: ElementRef<'_>) -> Option<String> {
        self.titles
            .first_text(candidate, |text| !text.is_empty())
            .or_else(|| {
                self.anchors_of(candidate)
                    .map(element_text)
                    .find(|text| text.chars().count() >= MIN_LINK_TITLE_CHARS)
            })
    }

    /// Description text, or an empty string when nothing long enough exists.
    pub fn description(&self, candidate: ElementRef<'_>) -> String {
        self.descriptions
            .first_text(candidate, |text| text.chars().count() > MIN_DESCRIPTION_CHARS)
            .unwrap_or_default()
    }

    /// First usable hyperlink, resolved to an absolute `http(s)` URL.
    pub fn link(&self, candidate: ElementRef<'_>) -> Option<String> {
        self.anchors_of(candidate)
            .filter_map(|anchor| anchor.value().attr("href"))
            .find_map(|href| resolve_link(&self.base, href))
    }

    pub fn requirements(&self, candidate: ElementRef<'_>) -> Option<String> {
        self.requirements.first_text(candidate, |text| !text.is_empty())
    }

    /// The candidate itself when it is an anchor, then every nested anchor.
    fn anchors_of<'a>(&self, candidate: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
        std::iter::once(candidate)
            .filter(|el| el.value().name() == "a")
            .chain(candidate.select(&self.anchors))
    }
}

/// Resolve `href` against `base`.
///
/// Empty hrefs and pure fragments (`#...`) are absent. Absolute hrefs are
/// kept as they are; root-relative and relative ones are joined. Anything
/// that does not end up as `http`/`https` (`javascript:`, `mailto:`) is absent too.
pub fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }
    let resolved = base.join(href).ok()?;
    matches!(resolved.scheme(), "http" | "https").then(|| resolved.to_string())
}
