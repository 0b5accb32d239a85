//! Match & rank: validates the inputs, parses the job description once and
//! scores every qualifying résumé against it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::MatchError;
use crate::matching::dictionary::Dictionaries;
use crate::matching::requirements::{extract_requirements, JobRequirement};
use crate::matching::scoring::{FitScorer, ScoreOptions, ScoreResult, ScoreWeights};

/// Minimum length, in characters after trimming, of a job description or a
/// résumé.
pub const MIN_TEXT_LEN: usize = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeEntry {
    #[serde(default)]
    pub name: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRequest {
    pub job_description: String,
    pub resumes: Vec<ResumeEntry>,
    #[serde(default)]
    pub anonymize: bool,
    /// Falls back to the configured defaults when absent.
    #[serde(default)]
    pub weights: Option<ScoreWeights>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    /// 1-based position in the ranking.
    pub rank: usize,
    pub name: String,
    pub fit_percent: u32,
    #[serde(flatten)]
    pub result: ScoreResult,
}

/// Everything a completed match produced. Held by a session so the report
/// can be generated later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub requirement: JobRequirement,
    pub candidates: Vec<RankedCandidate>,
    pub weights: ScoreWeights,
    pub anonymized: bool,
    pub created_at: DateTime<Utc>,
}

/// Trims the job description and rejects it when too short.
pub fn validate_job_description(raw: &str) -> Result<&str, MatchError> {
    let jd = raw.trim();
    if jd.chars().count() < MIN_TEXT_LEN {
        return Err(MatchError::DescriptionTooShort { min: MIN_TEXT_LEN });
    }
    Ok(jd)
}

/// Keeps résumés with enough text, naming unnamed ones "Candidate <n>" after
/// their position in the submitted list. Short entries are dropped silently.
pub fn qualifying_resumes(entries: &[ResumeEntry]) -> Vec<(String, &str)> {
    entries
        .iter()
        .enumerate()
        .filter_map(|(idx, entry)| {
            let text = entry.text.trim();
            if text.chars().count() < MIN_TEXT_LEN {
                debug!(position = idx + 1, "Skipping resume shorter than minimum length");
                return None;
            }
            let name = entry
                .name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("Candidate {}", idx + 1));
            Some((name, text))
        })
        .collect()
}

/// Scores each résumé independently and sorts by final score, highest
/// first. Ties keep submission order.
pub fn rank_candidates(
    requirement: &JobRequirement,
    resumes: &[(String, &str)],
    scorer: &dyn FitScorer,
    options: &ScoreOptions,
) -> Vec<RankedCandidate> {
    let mut scored: Vec<(String, ScoreResult)> = resumes
        .iter()
        .map(|(name, text)| (name.clone(), scorer.score(requirement, text, options)))
        .collect();

    scored.sort_by(|a, b| b.1.final_score.total_cmp(&a.1.final_score));

    scored
        .into_iter()
        .enumerate()
        .map(|(idx, (name, result))| RankedCandidate {
            rank: idx + 1,
            name,
            fit_percent: result.fit_percent(),
            result,
        })
        .collect()
}

/// Runs the full pipeline for one request.
pub fn run_match(
    request: &MatchRequest,
    dictionaries: &Dictionaries,
    scorer: &dyn FitScorer,
    default_weights: ScoreWeights,
    current_year: i32,
) -> Result<MatchOutcome, MatchError> {
    let jd = validate_job_description(&request.job_description)?;

    let resumes = qualifying_resumes(&request.resumes);
    if resumes.is_empty() {
        return Err(MatchError::NoValidCandidates { min: MIN_TEXT_LEN });
    }

    let requirement = extract_requirements(jd, dictionaries);
    let options = ScoreOptions {
        anonymize: request.anonymize,
        weights: request.weights.unwrap_or(default_weights),
        current_year,
    };

    let candidates = rank_candidates(&requirement, &resumes, scorer, &options);

    info!(
        submitted = request.resumes.len(),
        scored = candidates.len(),
        required = requirement.required_skills.len(),
        top_score = candidates.first().map(|c| c.fit_percent).unwrap_or(0),
        "Match completed"
    );

    Ok(MatchOutcome {
        requirement,
        candidates,
        weights: options.weights,
        anonymized: options.anonymize,
        created_at: Utc::now(),
    })
}
