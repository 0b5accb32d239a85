//! Job-description parsing into required/preferred skills, years and education.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matching::dictionary::Dictionaries;
use crate::matching::experience::extract_years_requirement;
use crate::matching::normalize::normalize_text;

const REQUIRED_CUES: &[&str] = &["must have", "required", "mandatory"];
const PREFERRED_CUES: &[&str] = &["good to have", "preferred", "nice to have"];

/// Structured requirements extracted from one job description.
///
/// `preferred_skills` never contains a skill that is also required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobRequirement {
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    /// 0 when the description does not state a number of years.
    pub years_required: u32,
    pub edu_required: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineClass {
    Required,
    Preferred,
    Other,
}

fn classify_line(line: &str) -> LineClass {
    let lower = line.to_lowercase();
    if REQUIRED_CUES.iter().any(|cue| lower.contains(cue)) {
        LineClass::Required
    } else if PREFERRED_CUES.iter().any(|cue| lower.contains(cue)) {
        LineClass::Preferred
    } else {
        LineClass::Other
    }
}

/// Parses a raw job description.
///
/// Required skills come from lines carrying a "required" cue, or from the
/// whole document when no such line exists. Preferred skills only come from
/// preferred lines.
pub fn extract_requirements(jd_raw: &str, dictionaries: &Dictionaries) -> JobRequirement {
    let lines: Vec<&str> = jd_raw
        .split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut required_lines = Vec::new();
    let mut preferred_lines = Vec::new();
    for &line in &lines {
        match classify_line(line) {
            LineClass::Required => required_lines.push(line),
            LineClass::Preferred => preferred_lines.push(line),
            LineClass::Other => {}
        }
    }

    let required_text = normalize_text(&required_lines.join("\n"));
    let preferred_text = normalize_text(&preferred_lines.join("\n"));
    let all_text = normalize_text(&lines.join("\n"));

    let required_skills = if required_text.is_empty() {
        dictionaries.skills.find_in(&all_text)
    } else {
        dictionaries.skills.find_in(&required_text)
    };

    let preferred_skills: Vec<String> = dictionaries
        .skills
        .find_in(&preferred_text)
        .into_iter()
        .filter(|skill| !required_skills.contains(skill))
        .collect();

    let requirement = JobRequirement {
        years_required: extract_years_requirement(&all_text),
        edu_required: dictionaries.education.find_in(&all_text),
        required_skills,
        preferred_skills,
    };

    debug!(
        required_lines = required_lines.len(),
        preferred_lines = preferred_lines.len(),
        required = requirement.required_skills.len(),
        preferred = requirement.preferred_skills.len(),
        years = requirement.years_required,
        "Parsed job description"
    );

    requirement
}
