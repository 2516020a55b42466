//! Scoring errors.

/// Errors during weighted scoring. A missing weight entry is
/// recovered via the neutral default weight; the variant exists so
/// the condition can be surfaced as a run note.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("no weight entry for {category}/{name}, using neutral default")]
    NoMatchingWeight { category: String, name: String },

    #[error("non-finite weighted score for pattern {pattern_id}")]
    NonFiniteScore { pattern_id: String },
}
