//! Keyword dictionaries and the boundary-aware matcher built on top of them.
//!
//! A dictionary maps a canonical term (the name reported back to callers) to the
//! surface variants that count as evidence for it. Variants are matched
//! literally, delimited by whitespace or the ends of the text, so `c++` never
//! behaves like a regex and never matches a bare `c`.

use std::path::Path;

use anyhow::Context;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

const SKILLS: &[(&str, &[&str])] = &[
    ("javascript", &["javascript", "js", "ecmascript"]),
    ("html", &["html", "html5"]),
    ("css", &["css", "css3"]),
    ("react", &["react", "reactjs"]),
    ("node.js", &["node", "nodejs", "node.js"]),
    ("express", &["express", "expressjs"]),
    ("sql", &["sql", "mysql", "postgres", "postgresql", "sqlite"]),
    ("mongodb", &["mongodb", "mongo"]),
    ("git", &["git", "github", "gitlab"]),
    ("docker", &["docker"]),
    ("aws", &["aws", "amazon web services"]),
    ("java", &["java"]),
    ("python", &["python"]),
    ("c++", &["c++", "cpp"]),
    ("c", &["c language", " c "]),
    (
        "dsa",
        &[
            "dsa",
            "data structures",
            "algorithms",
            "data structures and algorithms",
        ],
    ),
    ("machine learning", &["machine learning", "ml"]),
    ("data analysis", &["data analysis", "data analytics", "analytics"]),
    ("excel", &["excel", "ms excel"]),
    ("power bi", &["power bi", "powerbi"]),
    ("tableau", &["tableau"]),
    ("linux", &["linux", "ubuntu"]),
    ("rest api", &["rest", "rest api", "restful api"]),
    ("typescript", &["typescript", "ts"]),
    ("next.js", &["next.js", "nextjs", "next"]),
];

const EDUCATION: &[(&str, &[&str])] = &[
    ("b.tech", &["btech", "b.tech", "bachelor of technology"]),
    ("b.e", &["be", "b.e", "bachelor of engineering"]),
    ("b.sc", &["bsc", "b.sc", "bachelor of science"]),
    ("m.tech", &["mtech", "m.tech", "master of technology"]),
    ("mca", &["mca", "master of computer applications"]),
    ("mba", &["mba", "master of business administration"]),
    ("phd", &["phd", "doctorate"]),
];

const CERTIFICATIONS: &[(&str, &[&str])] = &[
    ("aws certified", &["aws certified", "aws certification"]),
    (
        "google cloud",
        &["google cloud", "gcp certification", "google cloud certified"],
    ),
    ("azure", &["azure certification", "microsoft azure"]),
    ("coursera", &["coursera certificate", "coursera certification"]),
    ("nptel", &["nptel"]),
];

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("term '{canonical}' has an unusable variant '{variant}': {source}")]
    InvalidVariant {
        canonical: String,
        variant: String,
        #[source]
        source: regex::Error,
    },

    #[error("dictionary term has an empty canonical name")]
    EmptyCanonical,
}

/// One canonical term and its surface variants, as written in config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryTerm {
    pub canonical: String,
    pub variants: Vec<String>,
}

impl DictionaryTerm {
    fn from_static(canonical: &str, variants: &[&str]) -> Self {
        Self {
            canonical: canonical.to_string(),
            variants: variants.iter().map(|v| v.to_string()).collect(),
        }
    }
}

/// On-disk shape of a dictionary extension file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DictionaryFile {
    #[serde(default)]
    pub skills: Vec<DictionaryTerm>,
    #[serde(default)]
    pub education: Vec<DictionaryTerm>,
    #[serde(default)]
    pub certifications: Vec<DictionaryTerm>,
}

#[derive(Debug, Clone)]
struct CompiledTerm {
    term: DictionaryTerm,
    patterns: Vec<Regex>,
}

/// A compiled, read-only dictionary. Matching preserves dictionary order.
#[derive(Debug, Clone)]
pub struct Dictionary {
    entries: Vec<CompiledTerm>,
}

impl Dictionary {
    pub fn compile(terms: Vec<DictionaryTerm>) -> Result<Self, DictionaryError> {
        let entries = terms
            .into_iter()
            .map(|term| {
                if term.canonical.trim().is_empty() {
                    return Err(DictionaryError::EmptyCanonical);
                }
                let patterns = term
                    .variants
                    .iter()
                    .filter(|v| !v.is_empty())
                    .map(|variant| {
                        variant_pattern(variant).map_err(|source| {
                            DictionaryError::InvalidVariant {
                                canonical: term.canonical.clone(),
                                variant: variant.clone(),
                                source,
                            }
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(CompiledTerm { term, patterns })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { entries })
    }

    fn from_static(terms: &[(&str, &[&str])]) -> Result<Self, DictionaryError> {
        Self::compile(
            terms
                .iter()
                .map(|(canonical, variants)| DictionaryTerm::from_static(canonical, variants))
                .collect(),
        )
    }

    /// Returns the canonical names with at least one variant present in `text`.
    ///
    /// `text` is expected to be normalized already; matching is
    /// case-insensitive either way.
    pub fn find_in(&self, text: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter(|entry| entry.patterns.iter().any(|re| re.is_match(text)))
            .map(|entry| entry.term.canonical.clone())
            .collect()
    }

    pub fn terms(&self) -> impl Iterator<Item = &DictionaryTerm> {
        self.entries.iter().map(|e| &e.term)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Replaces variants of existing canonicals in place and appends new ones.
    fn extended(self, extra: Vec<DictionaryTerm>) -> Result<Self, DictionaryError> {
        if extra.is_empty() {
            return Ok(self);
        }
        let mut terms: Vec<DictionaryTerm> = self.terms().cloned().collect();
        for term in extra {
            match terms.iter_mut().find(|t| t.canonical == term.canonical) {
                Some(existing) => existing.variants = term.variants,
                None => terms.push(term),
            }
        }
        Self::compile(terms)
    }
}

fn variant_pattern(variant: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?i)(^|\s){}(\s|$)", regex::escape(variant)))
}

/// The three vocabularies the scorer works with. Built once at startup and
/// shared read-only between requests.
#[derive(Debug, Clone)]
pub struct Dictionaries {
    pub skills: Dictionary,
    pub education: Dictionary,
    pub certifications: Dictionary,
}

impl Dictionaries {
    pub fn builtin() -> Result<Self, DictionaryError> {
        Ok(Self {
            skills: Dictionary::from_static(SKILLS)?,
            education: Dictionary::from_static(EDUCATION)?,
            certifications: Dictionary::from_static(CERTIFICATIONS)?,
        })
    }

    pub fn with_extensions(file: DictionaryFile) -> Result<Self, DictionaryError> {
        let builtin = Self::builtin()?;
        Ok(Self {
            skills: builtin.skills.extended(file.skills)?,
            education: builtin.education.extended(file.education)?,
            certifications: builtin.certifications.extended(file.certifications)?,
        })
    }

    /// Builds the built-in dictionaries, merged with the JSON extension file
    /// at `path` when one is configured.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let dictionaries = match path {
            None => Self::builtin()?,
            Some(path) => {
                let raw = std::fs::read_to_string(path).with_context(|| {
                    format!("Failed to read dictionary file '{}'", path.display())
                })?;
                let file: DictionaryFile = serde_json::from_str(&raw).with_context(|| {
                    format!("Dictionary file '{}' is not valid JSON", path.display())
                })?;
                Self::with_extensions(file)?
            }
        };

        info!(
            skills = dictionaries.skills.len(),
            education = dictionaries.education.len(),
            certifications = dictionaries.certifications.len(),
            "Dictionaries loaded"
        );
        Ok(dictionaries)
    }
}
