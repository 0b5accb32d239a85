//! Plain-text report of a completed match.

use std::fmt::Write;

use crate::errors::MatchError;
use crate::matching::ranking::MatchOutcome;

pub const REPORT_FILENAME: &str = "skillmatch_report.txt";

fn list_or_none<S: AsRef<str>>(items: &[S]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items
            .iter()
            .map(|s| s.as_ref())
            .collect::<Vec<&str>>()
            .join(", ")
    }
}

/// Renders the report for the last match. Fails when no match has run yet.
pub fn render_report(outcome: Option<&MatchOutcome>) -> Result<String, MatchError> {
    let outcome = outcome.ok_or(MatchError::NoMatchRun)?;
    let req = &outcome.requirement;

    let mut out = String::new();
    out.push_str("SkillMatch Report\n");
    out.push_str("================\n\n");

    out.push_str("Job Requirements\n");
    out.push_str("----------------\n");
    // writing into a String cannot fail
    let _ = writeln!(out, "Required Skills: {}", list_or_none(&req.required_skills));
    let _ = writeln!(out, "Preferred Skills: {}", list_or_none(&req.preferred_skills));
    let _ = writeln!(out, "Years Required: {}", req.years_required);
    let _ = writeln!(out, "Education Keywords: {}\n", list_or_none(&req.edu_required));

    out.push_str("Ranked Candidates\n");
    out.push_str("-----------------\n\n");

    for candidate in &outcome.candidates {
        let result = &candidate.result;
        let _ = writeln!(out, "#{} {}", candidate.rank, candidate.name);
        let _ = writeln!(out, "Fit Score: {}%", candidate.fit_percent);
        let _ = writeln!(out, "Matched Skills: {}", list_or_none(&result.matched_skills()));
        let _ = writeln!(out, "Missing Skills: {}", list_or_none(&result.missing_skills()));
        let _ = writeln!(
            out,
            "Experience Detected: {} years\n",
            result.breakdown.years_detected
        );
    }

    Ok(out)
}
