//! Years-of-experience detection from free text.
//!
//! `0` always means "not detected", never "confirmed zero years".

use std::sync::LazyLock;

use regex::Regex;

static YEARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)\s*\+?\s*years?").expect("valid years regex"));

static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(19[0-9]{2}|20[0-9]{2})\s*(to|-|–)\s*(present|19[0-9]{2}|20[0-9]{2})")
        .expect("valid date range regex")
});

/// Upper bound for experience summed from date ranges.
pub const MAX_RANGE_YEARS: u32 = 20;

/// Largest `N years` / `N+ years` mention in the text.
pub fn extract_years_requirement(text: &str) -> u32 {
    let normalized = super::normalize::normalize_text(text);
    YEARS_RE
        .captures_iter(&normalized)
        .filter_map(|caps| caps[1].parse::<u32>().ok())
        .max()
        .unwrap_or(0)
}

/// Sum of `YYYY - YYYY` / `YYYY to present` spans, capped at
/// [`MAX_RANGE_YEARS`]. Ranges that run backwards are ignored.
pub fn sum_date_ranges(text: &str, current_year: i32) -> u32 {
    let total: i64 = RANGE_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let start: i32 = caps[1].parse().ok()?;
            let end = if caps[3].eq_ignore_ascii_case("present") {
                current_year
            } else {
                caps[3].parse().ok()?
            };
            (end >= start).then(|| i64::from(end - start))
        })
        .sum();

    total.min(i64::from(MAX_RANGE_YEARS)) as u32
}

/// Candidate experience: an explicit `N years` mention wins; otherwise the
/// summed date ranges.
pub fn estimate_resume_years(text: &str, current_year: i32) -> u32 {
    match extract_years_requirement(text) {
        0 => sum_date_ranges(text, current_year),
        direct => direct,
    }
}
