//! CIEE course portal.

use super::Platform;

pub static PLATFORM: Platform = Platform {
    name: "CIEE",
    slug: "ciee",
    route: "ciee",
    url: "https://portal.ciee.org.br/cursos",
    keyword: "ciee",
    candidates: &[
        ".course-item",
        ".curso-item",
        ".card",
        ".course-card",
        "article",
        ".item",
        "[class*=\"curso\"]",
        "[class*=\"course\"]",
        ".ciee-course",
        ".ciee-item",
    ],
    titles: &[
        "h1", "h2", "h3", "h4", "h5", "h6",
        ".title",
        ".titulo",
        ".course-title",
        "[class*=\"title\"]",
        "[class*=\"titulo\"]",
    ],
    descriptions: &[
        ".description",
        ".descricao",
        ".course-description",
        "p",
        ".summary",
        ".resumo",
    ],
    requirements: &[
        ".requirements",
        ".requisitos",
        ".prerequisites",
        "[class*=\"requisito\"]",
        "[class*=\"requirement\"]",
    ],
};
