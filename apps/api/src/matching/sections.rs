//! Résumé section splitting by heading lines.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The fixed set of résumé sections the splitter recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Other,
    Skills,
    TechnicalSkills,
    Projects,
    Experience,
    WorkExperience,
    Education,
    Certifications,
    Achievements,
    Summary,
}

/// Heading keywords in the order they are tried.
const HEADINGS: &[(&str, SectionKind)] = &[
    ("skills", SectionKind::Skills),
    ("technical skills", SectionKind::TechnicalSkills),
    ("projects", SectionKind::Projects),
    ("experience", SectionKind::Experience),
    ("work experience", SectionKind::WorkExperience),
    ("education", SectionKind::Education),
    ("certifications", SectionKind::Certifications),
    ("achievements", SectionKind::Achievements),
    ("summary", SectionKind::Summary),
];

impl SectionKind {
    /// Returns the section a line opens, if it is a heading.
    ///
    /// A heading is the bare keyword or the keyword followed by a colon; any
    /// text after the colon belongs to the heading, not the section body.
    fn from_heading(line: &str) -> Option<Self> {
        let lower = line.to_lowercase();
        HEADINGS.iter().find_map(|(name, kind)| {
            let is_heading = lower == *name
                || lower
                    .strip_prefix(name)
                    .is_some_and(|rest| rest.starts_with(':'));
            is_heading.then_some(*kind)
        })
    }
}

/// Résumé text partitioned by section. Only sections that were opened (plus
/// `Other`) are present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResumeSections {
    sections: HashMap<SectionKind, String>,
}

impl ResumeSections {
    pub fn get(&self, kind: SectionKind) -> Option<&str> {
        self.sections.get(&kind).map(String::as_str)
    }

    /// Text of `kind`, or the empty string when the section is absent.
    pub fn text(&self, kind: SectionKind) -> &str {
        self.get(kind).unwrap_or("")
    }

    /// Experience text, falling back to "work experience" when the plain
    /// experience section is missing or empty.
    pub fn experience_text(&self) -> &str {
        match self.text(SectionKind::Experience) {
            "" => self.text(SectionKind::WorkExperience),
            text => text,
        }
    }
}

/// Splits raw résumé text into sections keyed by heading.
pub fn split_sections(raw: &str) -> ResumeSections {
    let mut lines_by_section: HashMap<SectionKind, Vec<&str>> = HashMap::new();
    let mut current = SectionKind::Other;
    lines_by_section.insert(current, Vec::new());

    for line in raw.split('\n').map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(kind) = SectionKind::from_heading(line) {
            current = kind;
            lines_by_section.entry(current).or_default();
            continue;
        }
        lines_by_section.entry(current).or_default().push(line);
    }

    ResumeSections {
        sections: lines_by_section
            .into_iter()
            .map(|(kind, lines)| (kind, lines.join("\n")))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_heading_opens_section() {
        let s = split_sections("Skills\nPython, SQL");
        assert_eq!(s.get(SectionKind::Skills), Some("Python, SQL"));
        assert_eq!(s.get(SectionKind::Other), Some(""));
    }

    #[test]
    fn test_heading_with_colon_discards_inline_text() {
        let s = split_sections("SKILLS: JavaScript, React\nEXPERIENCE: 2022-2024");
        assert_eq!(s.get(SectionKind::Skills), Some(""));
        assert_eq!(s.get(SectionKind::Experience), Some(""));
    }

    #[test]
    fn test_lines_before_first_heading_go_to_other() {
        let s = split_sections("Jane Doe\nBackend engineer\n\nPROJECTS\nBuilt a CLI");
        assert_eq!(s.get(SectionKind::Other), Some("Jane Doe\nBackend engineer"));
        assert_eq!(s.get(SectionKind::Projects), Some("Built a CLI"));
    }

    #[test]
    fn test_lines_are_trimmed_and_blank_lines_dropped() {
        let s = split_sections("  education  \n\n   B.Tech   \n\n");
        assert_eq!(s.get(SectionKind::Education), Some("B.Tech"));
    }

    #[test]
    fn test_multi_word_headings() {
        let s = split_sections("Work Experience\nAcme Corp\nTechnical Skills:\nRust");
        assert_eq!(s.get(SectionKind::WorkExperience), Some("Acme Corp"));
        assert_eq!(s.get(SectionKind::TechnicalSkills), Some("Rust"));
        assert!(s.get(SectionKind::Skills).is_none());
    }

    #[test]
    fn test_heading_prefix_without_colon_is_content() {
        let s = split_sections("Skills\nSkillset includes Go\nskills matrix attached");
        assert_eq!(
            s.get(SectionKind::Skills),
            Some("Skillset includes Go\nskills matrix attached")
        );
    }

    #[test]
    fn test_repeated_heading_appends() {
        let s = split_sections("Skills\nRust\nProjects\nCLI\nSkills\nGo");
        assert_eq!(s.get(SectionKind::Skills), Some("Rust\nGo"));
    }

    #[test]
    fn test_unknown_headings_are_not_sections() {
        let s = split_sections("Hobbies\nChess");
        assert_eq!(s.get(SectionKind::Other), Some("Hobbies\nChess"));
        assert_eq!(s.sections.len(), 1);
    }

    #[test]
    fn test_experience_falls_back_to_work_experience() {
        let s = split_sections("Work Experience\nAcme");
        assert_eq!(s.experience_text(), "Acme");

        let s = split_sections("Experience\nWork Experience\nAcme");
        assert_eq!(s.experience_text(), "Acme");

        let s = split_sections("Experience\nInitech\nWork Experience\nAcme");
        assert_eq!(s.experience_text(), "Initech");
    }

    #[test]
    fn test_empty_input() {
        let s = split_sections("");
        assert_eq!(s.get(SectionKind::Other), Some(""));
        assert_eq!(s.text(SectionKind::Skills), "");
    }

    #[test]
    fn test_crlf_lines() {
        let s = split_sections("Skills\r\nPython\r\n");
        assert_eq!(s.get(SectionKind::Skills), Some("Python"));
    }
}
