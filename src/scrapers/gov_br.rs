//! Escola Virtual de Governo (Gov.br) catalog.
//!
//! Listing cards are plain `div`s; many share generic class names, so the
//! `evg` keyword drives the fallback scan when none of the card selectors hit.

use super::Platform;

pub static PLATFORM: Platform = Platform {
    name: "Gov.br",
    slug: "gov_br",
    route: "gov-br",
    url: "https://www.escolavirtual.gov.br/catalogo",
    keyword: "evg",
    candidates: &[
        ".card-curso",
        ".curso-card",
        ".course-item",
        ".card",
        "article",
        "[class*=\"curso\"]",
        "[class*=\"course\"]",
    ],
    titles: &[
        "h1", "h2", "h3", "h4", "h5", "h6",
        ".titulo-curso",
        ".titulo",
        ".title",
        "[class*=\"titulo\"]",
        "[class*=\"title\"]",
    ],
    descriptions: &[
        ".descricao",
        ".description",
        ".ementa",
        ".resumo",
        "p",
    ],
    requirements: &[
        ".publico-alvo",
        ".requisitos",
        ".prerequisites",
        "[class*=\"requisito\"]",
    ],
};
