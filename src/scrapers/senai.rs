//! SENAI free online courses.

use super::Platform;

pub static PLATFORM: Platform = Platform {
    name: "SENAI",
    slug: "senai",
    route: "senai",
    url: "https://www.senaicursosonline.com.br/cursos-gratuitos",
    keyword: "senai",
    candidates: &[
        ".card-curso",
        ".curso-item",
        ".course-card",
        ".card",
        "article",
        "[class*=\"curso\"]",
        ".senai-curso",
    ],
    titles: &[
        "h1", "h2", "h3", "h4", "h5", "h6",
        ".nome-curso",
        ".titulo",
        ".title",
        "[class*=\"titulo\"]",
        "[class*=\"title\"]",
    ],
    descriptions: &[
        ".descricao",
        ".description",
        ".resumo",
        "p",
    ],
    requirements: &[
        ".requisitos",
        ".pre-requisitos",
        ".requirements",
        "[class*=\"requisito\"]",
    ],
};
