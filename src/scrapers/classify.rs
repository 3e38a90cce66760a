//! Keyword-based knowledge-area classification.
//!
//! Courses are bucketed into a coarse subject area by looking for keyword
//! substrings in the lowercased `"{title} {description}"`. The table is
//! scanned in declaration order and the first category with any matching
//! keyword wins, so a course mentioning both "python" and "vendas" is always
//! "Tecnologia".

use crate::models::DEFAULT_KNOWLEDGE_AREA;

/// Ordered (label, keywords) table. Keywords are lowercase.
pub const KNOWLEDGE_AREAS: &[(&str, &[&str])] = &[
    (
        "Tecnologia",
        &["programação", "python", "java", "web", "desenvolvimento", "ti", "tecnologia"],
    ),
    ("Marketing", &["marketing", "digital", "publicidade", "vendas"]),
    (
        "Administração",
        &["administração", "gestão", "empreendedorismo", "negócios"],
    ),
    ("Design", &["design", "criatividade", "arte", "visual"]),
    ("Saúde", &["saúde", "medicina", "enfermagem", "fisioterapia"]),
    ("Educação", &["educação", "pedagogia", "ensino"]),
    ("Finanças", &["finanças", "contabilidade", "economia"]),
    (
        "Recursos Humanos",
        &["rh", "recursos humanos", "gestão de pessoas"],
    ),
];

/// Assign exactly one knowledge area to a course.
///
/// `description` may be empty. Returns [`DEFAULT_KNOWLEDGE_AREA`] when no
/// keyword matches.
pub fn classify(title: &str, description: &str) -> &'static str {
    let haystack = format!("{title} {description}").to_lowercase();

    KNOWLEDGE_AREAS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| haystack.contains(kw)))
        .map(|(area, _)| *area)
        .unwrap_or(DEFAULT_KNOWLEDGE_AREA)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_python_course_is_technology() {
        assert_eq!(classify("Curso de Python para Web", ""), "Tecnologia");
    }

    #[test]
    fn test_first_declared_category_wins() {
        // "gestão" (Administração) is declared before "gestão de pessoas" (Recursos Humanos)
        assert_eq!(classify("Gestão de Pessoas", ""), "Administração");
        // "web" (Tecnologia) beats "marketing"
        assert_eq!(classify("Marketing para Web", ""), "Tecnologia");
    }

    #[test]
    fn test_description_contributes_keywords() {
        assert_eq!(classify("Excel", "Planilhas aplicadas a vendas"), "Marketing");
        assert_eq!(classify("Noções Básicas", "Introdução à contabilidade"), "Finanças");
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(classify("ENFERMAGEM DO TRABALHO", ""), "Saúde");
        assert_eq!(classify("Design Gráfico", ""), "Design");
    }

    #[test]
    fn test_no_keyword_falls_back_to_general() {
        assert_eq!(classify("Inglês Básico", ""), DEFAULT_KNOWLEDGE_AREA);
        assert_eq!(classify("", ""), "Geral");
    }

    #[test]
    fn test_labels_are_unique() {
        let mut labels: Vec<_> = KNOWLEDGE_AREAS.iter().map(|(l, _)| *l).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), KNOWLEDGE_AREAS.len());
    }
}
