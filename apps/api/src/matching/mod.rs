// Résumé / job description matching.
// Implements: normalization, dictionary matching, section splitting, anonymization,
// requirement extraction, experience estimation, scoring, ranking and reports.
// Everything here is pure and in-memory; only handlers and session touch shared state.

pub mod anonymize;
pub mod dictionary;
pub mod example;
pub mod experience;
pub mod handlers;
pub mod normalize;
pub mod ranking;
pub mod report;
pub mod requirements;
pub mod scoring;
pub mod sections;
pub mod session;
