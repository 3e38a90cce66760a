//! Google Ateliê Digital course catalog.
//!
//! The catalog renders one `[data-testid='course-card']` per course. Cards
//! carry their title in an `h3` and rarely publish prerequisites.

use super::Platform;

pub static PLATFORM: Platform = Platform {
    name: "Google Ateliê Digital",
    slug: "google_atelie",
    route: "google-atelie",
    url: "https://learndigital.withgoogle.com/ateliedigital/courses",
    keyword: "atelie",
    candidates: &[
        "[data-testid='course-card']",
        ".course-card",
        "[class*=\"course\"]",
    ],
    titles: &[
        "h3",
        "[data-testid='course-title']",
        ".course-title",
        "h2",
        "h1",
    ],
    descriptions: &[
        "[data-testid='course-description']",
        ".course-description",
        "p",
        ".description",
    ],
    requirements: &[
        "[data-testid='course-requirements']",
        ".requirements",
        ".prerequisites",
    ],
};
