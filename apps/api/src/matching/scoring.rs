//! Fit scoring: weighted, explainable comparison of one résumé against a
//! parsed job description.
//!
//! Default backend: `KeywordFitScorer` (dictionary lookups, deterministic).
//! `AppState` holds an `Arc<dyn FitScorer>` so the backend can be swapped at
//! startup without touching handlers.

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::matching::anonymize::anonymize_resume;
use crate::matching::dictionary::Dictionaries;
use crate::matching::experience::estimate_resume_years;
use crate::matching::normalize::normalize_text;
use crate::matching::requirements::JobRequirement;
use crate::matching::sections::{split_sections, SectionKind};

// ────────────────────────────────────────────────────────────────────────────
// Weights
// ────────────────────────────────────────────────────────────────────────────

const SKILLS_SECTION_EVIDENCE: f64 = 1.0;
const PROJECTS_EVIDENCE: f64 = 2.0;
const EXPERIENCE_EVIDENCE: f64 = 2.0;
const DOCUMENT_EVIDENCE: f64 = 0.5;

const REQUIRED_SHARE: f64 = 0.75;
const PREFERRED_SHARE: f64 = 0.25;

/// Years that earn full experience credit when the JD states none.
const UNSTATED_YEARS_FULL_CREDIT: f64 = 5.0;

const EDU_MISSING_REQUIRED: f64 = 0.35;
const EDU_NONE_FOUND: f64 = 0.6;
const CERT_NONE_FOUND: f64 = 0.65;

const PROOF_BOOST_DIVISOR: f64 = 20.0;
pub const MAX_PROOF_BOOST: f64 = 0.06;

/// Relative category weights as entered by the user (non-negative integers,
/// any scale). Non-numeric or negative input deserializes to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreWeights {
    #[serde(default, deserialize_with = "lenient_weight")]
    pub skills: u32,
    #[serde(default, deserialize_with = "lenient_weight")]
    pub experience: u32,
    #[serde(default, deserialize_with = "lenient_weight")]
    pub education: u32,
    #[serde(default, deserialize_with = "lenient_weight")]
    pub certifications: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            skills: 50,
            experience: 25,
            education: 15,
            certifications: 10,
        }
    }
}

/// Weights scaled to sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizedWeights {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
    pub certifications: f64,
}

impl ScoreWeights {
    /// Divides each weight by the total. When every weight is zero the divisor
    /// is 1, so all normalized weights (and the weighted sum) are 0.
    pub fn normalized(&self) -> NormalizedWeights {
        let skills = f64::from(self.skills);
        let experience = f64::from(self.experience);
        let education = f64::from(self.education);
        let certifications = f64::from(self.certifications);

        let sum = skills + experience + education + certifications;
        let divisor = if sum > 0.0 { sum } else { 1.0 };

        NormalizedWeights {
            skills: skills / divisor,
            experience: experience / divisor,
            education: education / divisor,
            certifications: certifications / divisor,
        }
    }
}

fn lenient_weight<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let weight = match value {
        Value::Number(n) => n
            .as_u64()
            .map(|v| v.min(u64::from(u32::MAX)) as u32)
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as u32))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse::<u32>().unwrap_or(0),
        _ => 0,
    };
    Ok(weight)
}

/// Per-call knobs for the scorer.
#[derive(Debug, Clone, Copy)]
pub struct ScoreOptions {
    pub anonymize: bool,
    pub weights: ScoreWeights,
    /// Resolves "present" in date ranges.
    pub current_year: i32,
}

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// Where a skill was found in the résumé and how much that counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillEvidence {
    pub skill: String,
    pub in_skills_section: bool,
    pub in_projects: bool,
    pub in_experience: bool,
    pub in_document: bool,
    pub weight: f64,
}

/// What was extracted from one résumé.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub skills: Vec<SkillEvidence>,
    pub years_detected: u32,
    pub education: Vec<String>,
    pub certifications: Vec<String>,
}

impl CandidateProfile {
    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.iter().any(|e| e.skill == skill)
    }

    fn evidence_weight(&self, skill: &str) -> f64 {
        self.skills
            .iter()
            .find(|e| e.skill == skill)
            .map(|e| e.weight)
            .unwrap_or(0.0)
    }
}

/// Per-category sub-scores, each in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
    pub certifications: f64,
    pub years_detected: u32,
    /// In [0, MAX_PROOF_BOOST].
    pub proof_boost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Always in [0, 1].
    pub final_score: f64,
    pub breakdown: ScoreBreakdown,
    pub matched_required: Vec<String>,
    pub missing_required: Vec<String>,
    pub matched_preferred: Vec<String>,
    pub missing_preferred: Vec<String>,
    pub profile: CandidateProfile,
}

impl ScoreResult {
    /// Final score as a rounded percentage.
    pub fn fit_percent(&self) -> u32 {
        as_percent(self.final_score)
    }

    /// Matched required skills followed by matched preferred ones.
    pub fn matched_skills(&self) -> Vec<&str> {
        self.matched_required
            .iter()
            .chain(&self.matched_preferred)
            .map(String::as_str)
            .collect()
    }

    pub fn missing_skills(&self) -> Vec<&str> {
        self.missing_required
            .iter()
            .chain(&self.missing_preferred)
            .map(String::as_str)
            .collect()
    }
}

pub fn as_percent(score: f64) -> u32 {
    (score * 100.0).round().max(0.0) as u32
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The fit scorer trait. Implement this to swap backends without touching
/// ranking, handlers or callers.
pub trait FitScorer: Send + Sync {
    fn score(
        &self,
        requirement: &JobRequirement,
        resume_text: &str,
        options: &ScoreOptions,
    ) -> ScoreResult;
}

/// Dictionary-based scorer. Fast, deterministic, no external calls.
pub struct KeywordFitScorer {
    dictionaries: Arc<Dictionaries>,
}

impl KeywordFitScorer {
    pub fn new(dictionaries: Arc<Dictionaries>) -> Self {
        Self { dictionaries }
    }
}

impl FitScorer for KeywordFitScorer {
    fn score(
        &self,
        requirement: &JobRequirement,
        resume_text: &str,
        options: &ScoreOptions,
    ) -> ScoreResult {
        score_candidate(requirement, resume_text, &self.dictionaries, options)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core scoring algorithm
// ────────────────────────────────────────────────────────────────────────────

/// Extracts skills with section provenance, years, education and
/// certifications from (possibly anonymized) résumé text.
pub fn build_profile(
    resume_text: &str,
    dictionaries: &Dictionaries,
    current_year: i32,
) -> CandidateProfile {
    let sections = split_sections(resume_text);
    let document = normalize_text(resume_text);

    let skills_dict = &dictionaries.skills;
    let in_skills = skills_dict.find_in(&normalize_text(sections.text(SectionKind::Skills)));
    let in_projects = skills_dict.find_in(&normalize_text(sections.text(SectionKind::Projects)));
    let in_experience = skills_dict.find_in(&normalize_text(sections.experience_text()));
    let in_document = skills_dict.find_in(&document);

    // first-seen order across skills, projects, experience, whole document
    let mut all_skills: Vec<&String> = Vec::new();
    for skill in in_skills
        .iter()
        .chain(&in_projects)
        .chain(&in_experience)
        .chain(&in_document)
    {
        if !all_skills.contains(&skill) {
            all_skills.push(skill);
        }
    }

    let skills = all_skills
        .into_iter()
        .map(|skill| {
            let mut evidence = SkillEvidence {
                skill: skill.clone(),
                in_skills_section: in_skills.contains(skill),
                in_projects: in_projects.contains(skill),
                in_experience: in_experience.contains(skill),
                in_document: in_document.contains(skill),
                weight: 0.0,
            };
            evidence.weight = [
                (evidence.in_skills_section, SKILLS_SECTION_EVIDENCE),
                (evidence.in_projects, PROJECTS_EVIDENCE),
                (evidence.in_experience, EXPERIENCE_EVIDENCE),
                (evidence.in_document, DOCUMENT_EVIDENCE),
            ]
            .iter()
            .filter(|(present, _)| *present)
            .map(|(_, w)| w)
            .sum();
            evidence
        })
        .collect();

    CandidateProfile {
        skills,
        years_detected: estimate_resume_years(resume_text, current_year),
        education: dictionaries.education.find_in(&document),
        certifications: dictionaries.certifications.find_in(&document),
    }
}

fn ratio(matched: usize, total: usize) -> f64 {
    if total == 0 {
        1.0
    } else {
        matched as f64 / total as f64
    }
}

fn partition(wanted: &[String], profile: &CandidateProfile) -> (Vec<String>, Vec<String>) {
    wanted.iter().cloned().partition(|s| profile.has_skill(s))
}

/// Scores one résumé against a requirement.
pub fn score_candidate(
    requirement: &JobRequirement,
    resume_raw: &str,
    dictionaries: &Dictionaries,
    options: &ScoreOptions,
) -> ScoreResult {
    let resume_text = if options.anonymize {
        anonymize_resume(resume_raw)
    } else {
        resume_raw.to_string()
    };

    let profile = build_profile(&resume_text, dictionaries, options.current_year);

    let (matched_required, missing_required) = partition(&requirement.required_skills, &profile);
    let (matched_preferred, missing_preferred) =
        partition(&requirement.preferred_skills, &profile);

    let skills = REQUIRED_SHARE
        * ratio(matched_required.len(), requirement.required_skills.len())
        + PREFERRED_SHARE * ratio(matched_preferred.len(), requirement.preferred_skills.len());

    let years = f64::from(profile.years_detected);
    let experience = if requirement.years_required > 0 {
        (years / f64::from(requirement.years_required)).min(1.0)
    } else {
        (years / UNSTATED_YEARS_FULL_CREDIT).min(1.0)
    };

    let education = if !requirement.edu_required.is_empty() {
        let has_required = requirement
            .edu_required
            .iter()
            .any(|e| profile.education.contains(e));
        if has_required {
            1.0
        } else {
            EDU_MISSING_REQUIRED
        }
    } else if !profile.education.is_empty() {
        1.0
    } else {
        EDU_NONE_FOUND
    };

    let certifications = if profile.certifications.is_empty() {
        CERT_NONE_FOUND
    } else {
        1.0
    };

    let w = options.weights.normalized();
    let weighted = w.skills * skills
        + w.experience * experience
        + w.education * education
        + w.certifications * certifications;

    let proof: f64 = matched_required
        .iter()
        .map(|s| profile.evidence_weight(s))
        .sum();
    let proof_boost = (proof / PROOF_BOOST_DIVISOR).min(MAX_PROOF_BOOST);

    let final_score = (weighted + proof_boost).clamp(0.0, 1.0);

    ScoreResult {
        final_score,
        breakdown: ScoreBreakdown {
            skills,
            experience,
            education,
            certifications,
            years_detected: profile.years_detected,
            proof_boost,
        },
        matched_required,
        missing_required,
        matched_preferred,
        missing_preferred,
        profile,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn dicts() -> Dictionaries {
        Dictionaries::builtin().unwrap()
    }

    fn options() -> ScoreOptions {
        ScoreOptions {
            anonymize: false,
            weights: ScoreWeights::default(),
            current_year: 2025,
        }
    }

    fn requirement(required: &[&str], preferred: &[&str], years: u32) -> JobRequirement {
        JobRequirement {
            required_skills: required.iter().map(|s| s.to_string()).collect(),
            preferred_skills: preferred.iter().map(|s| s.to_string()).collect(),
            years_required: years,
            edu_required: vec![],
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_weights_normalize_to_one() {
        let w = ScoreWeights::default().normalized();
        let sum = w.skills + w.experience + w.education + w.certifications;
        assert!(approx(sum, 1.0));
        assert!(approx(w.skills, 0.5));
    }

    #[test]
    fn test_all_zero_weights_normalize_to_zero() {
        let w = ScoreWeights {
            skills: 0,
            experience: 0,
            education: 0,
            certifications: 0,
        }
        .normalized();
        assert_eq!(w.skills, 0.0);
        assert_eq!(w.certifications, 0.0);
    }

    #[test]
    fn test_lenient_weight_deserialization() {
        let w: ScoreWeights = serde_json::from_str(
            r#"{"skills": "40", "experience": "lots", "education": -3, "certifications": 12.7}"#,
        )
        .unwrap();
        assert_eq!(w.skills, 40);
        assert_eq!(w.experience, 0);
        assert_eq!(w.education, 0);
        assert_eq!(w.certifications, 12);

        let w: ScoreWeights = serde_json::from_str(r#"{"skills": 10}"#).unwrap();
        assert_eq!(w.experience, 0);
    }

    #[test]
    fn test_evidence_weights_are_additive() {
        let resume = "SKILLS\nReact\nPROJECTS\nBuilt a React app\nEXPERIENCE\nReact developer";
        let profile = build_profile(resume, &dicts(), 2025);

        let react = &profile.skills[0];
        assert_eq!(react.skill, "react");
        assert!(react.in_skills_section && react.in_projects && react.in_experience);
        assert!(react.in_document);
        assert!(approx(react.weight, 5.5));
    }

    #[test]
    fn test_document_only_skill_has_half_weight() {
        let profile = build_profile("Enthusiastic about python scripting", &dicts(), 2025);
        assert_eq!(profile.skills.len(), 1);
        assert!(!profile.skills[0].in_skills_section);
        assert!(approx(profile.skills[0].weight, 0.5));
    }

    #[test]
    fn test_skill_order_is_first_seen_by_section() {
        let resume = "Python and SQL fan\nSKILLS\nSQL";
        let profile = build_profile(resume, &dicts(), 2025);
        let names: Vec<&str> = profile.skills.iter().map(|e| e.skill.as_str()).collect();
        assert_eq!(names, vec!["sql", "python"]);
    }

    #[test]
    fn test_work_experience_section_counts_as_experience() {
        let profile = build_profile("WORK EXPERIENCE\nDocker pipelines", &dicts(), 2025);
        assert!(profile.skills[0].in_experience);
        assert!(approx(profile.skills[0].weight, 2.5));
    }

    #[test]
    fn test_matched_and_missing_partition() {
        let req = requirement(&["javascript", "react"], &["node.js", "aws"], 0);
        let result = score_candidate(&req, "JavaScript and AWS and Git", &dicts(), &options());

        assert_eq!(result.matched_required, vec!["javascript"]);
        assert_eq!(result.missing_required, vec!["react"]);
        assert_eq!(result.matched_preferred, vec!["aws"]);
        assert_eq!(result.missing_preferred, vec!["node.js"]);
        assert_eq!(result.matched_skills(), vec!["javascript", "aws"]);
        assert_eq!(result.missing_skills(), vec!["react", "node.js"]);
        // 0.75 * 1/2 + 0.25 * 1/2
        assert!(approx(result.breakdown.skills, 0.5));
    }

    #[test]
    fn test_no_requirements_gives_full_skill_score() {
        let req = requirement(&[], &[], 0);
        let result = score_candidate(&req, "anything at all", &dicts(), &options());
        assert!(approx(result.breakdown.skills, 1.0));
    }

    #[test]
    fn test_experience_score() {
        let req = requirement(&[], &[], 4);
        let result = score_candidate(&req, "2 years of work", &dicts(), &options());
        assert!(approx(result.breakdown.experience, 0.5));

        let result = score_candidate(&req, "9 years of work", &dicts(), &options());
        assert!(approx(result.breakdown.experience, 1.0));

        let unstated = requirement(&[], &[], 0);
        let result = score_candidate(&unstated, "2 years of work", &dicts(), &options());
        assert!(approx(result.breakdown.experience, 0.4));

        let result = score_candidate(&unstated, "no dates here", &dicts(), &options());
        assert_eq!(result.breakdown.years_detected, 0);
        assert_eq!(result.breakdown.experience, 0.0);
    }

    #[test]
    fn test_education_score() {
        let mut req = requirement(&[], &[], 0);
        let result = score_candidate(&req, "Degree: B.Sc", &dicts(), &options());
        assert!(approx(result.breakdown.education, 1.0));

        let result = score_candidate(&req, "Self taught", &dicts(), &options());
        assert!(approx(result.breakdown.education, 0.6));

        req.edu_required = vec!["b.tech".to_string()];
        let result = score_candidate(&req, "Degree: B.Sc", &dicts(), &options());
        assert!(approx(result.breakdown.education, 0.35));

        let result = score_candidate(&req, "Degree: BTech", &dicts(), &options());
        assert!(approx(result.breakdown.education, 1.0));
    }

    #[test]
    fn test_certification_score() {
        let req = requirement(&[], &[], 0);
        let result = score_candidate(&req, "Completed NPTEL course", &dicts(), &options());
        assert!(approx(result.breakdown.certifications, 1.0));
        assert_eq!(result.profile.certifications, vec!["nptel"]);

        let result = score_candidate(&req, "No certificates", &dicts(), &options());
        assert!(approx(result.breakdown.certifications, 0.65));
    }

    #[test]
    fn test_proof_boost_is_capped() {
        let req = requirement(&["react"], &[], 0);
        let strong = "SKILLS\nReact\nPROJECTS\nReact app\nEXPERIENCE\nReact work";
        let result = score_candidate(&req, strong, &dicts(), &options());
        assert!(approx(result.breakdown.proof_boost, MAX_PROOF_BOOST));

        let weak = "I have touched react once";
        let result = score_candidate(&req, weak, &dicts(), &options());
        assert!(approx(result.breakdown.proof_boost, 0.025));
    }

    #[test]
    fn test_proof_boost_ignores_preferred_skills() {
        let req = requirement(&[], &["react"], 0);
        let result = score_candidate(&req, "SKILLS\nReact", &dicts(), &options());
        assert_eq!(result.breakdown.proof_boost, 0.0);
    }

    #[test]
    fn test_weighted_final_score() {
        let req = requirement(&["javascript", "react"], &["node.js"], 2);
        let resume = "SKILLS: JavaScript, React, Git\nEXPERIENCE: 2022-2024";
        let result = score_candidate(&req, resume, &dicts(), &options());

        assert!(approx(result.breakdown.skills, 0.75));
        assert!(approx(result.breakdown.experience, 1.0));
        assert!(approx(result.breakdown.education, 0.6));
        assert!(approx(result.breakdown.certifications, 0.65));
        assert!(approx(result.breakdown.proof_boost, 0.05));
        // 0.5*0.75 + 0.25*1 + 0.15*0.6 + 0.1*0.65 + 0.05
        assert!(approx(result.final_score, 0.83));
        assert_eq!(result.fit_percent(), 83);
    }

    #[test]
    fn test_final_score_clamped_to_one() {
        let req = requirement(&["react"], &[], 1);
        let resume = "SKILLS\nReact\nPROJECTS\nReact\nEXPERIENCE\n5 years React\nEDUCATION\nB.Tech\nAWS certified";
        let result = score_candidate(&req, resume, &dicts(), &options());
        assert_eq!(result.final_score, 1.0);
    }

    #[test]
    fn test_all_zero_weights_leave_only_proof_boost() {
        let zero = ScoreOptions {
            weights: ScoreWeights {
                skills: 0,
                experience: 0,
                education: 0,
                certifications: 0,
            },
            ..options()
        };
        let req = requirement(&["python"], &[], 0);
        let result = score_candidate(&req, "python", &dicts(), &zero);
        assert!(approx(result.final_score, 0.025));

        let result = score_candidate(&req, "nothing relevant", &dicts(), &zero);
        assert_eq!(result.final_score, 0.0);
    }

    #[test]
    fn test_final_score_always_in_unit_interval() {
        let req = requirement(&["javascript", "react", "sql"], &["docker"], 3);
        let resumes = [
            "",
            "SKILLS\nJavaScript React SQL Docker\nEXPERIENCE\n2000 - present\nPhD\nNPTEL",
            "nothing",
            "javascript react sql docker 40 years",
        ];
        let weight_sets = [
            ScoreWeights::default(),
            ScoreWeights {
                skills: 0,
                experience: 0,
                education: 0,
                certifications: 0,
            },
            ScoreWeights {
                skills: 1000,
                experience: 0,
                education: 0,
                certifications: 1,
            },
        ];
        for weights in weight_sets {
            for resume in resumes {
                let opts = ScoreOptions { weights, ..options() };
                let score = score_candidate(&req, resume, &dicts(), &opts).final_score;
                assert!((0.0..=1.0).contains(&score), "{score} out of range");
            }
        }
    }

    #[test]
    fn test_anonymize_flag_applies_before_extraction() {
        let req = requirement(&[], &[], 0);
        // with redaction the compact year range becomes a phone placeholder
        let resume = "EXPERIENCE\nIntern 2022-2024";
        let plain = score_candidate(&req, resume, &dicts(), &options());
        assert_eq!(plain.breakdown.years_detected, 2);

        let anon = ScoreOptions {
            anonymize: true,
            ..options()
        };
        let redacted = score_candidate(&req, resume, &dicts(), &anon);
        assert_eq!(redacted.breakdown.years_detected, 0);
    }

    #[test]
    fn test_keyword_scorer_delegates() {
        let scorer = KeywordFitScorer::new(Arc::new(dicts()));
        let req = requirement(&["python"], &[], 0);
        let result = scorer.score(&req, "python developer", &options());
        assert_eq!(result.matched_required, vec!["python"]);
    }
}
