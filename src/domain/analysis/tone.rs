//! Tone vector - the five scored dimensions of a single answer.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Score;

/// Five-dimensional tone profile of one free-text answer.
///
/// Every dimension is a [`Score`], so values are always clamped to [0, 1]
/// and rounded to 2 decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ToneVector {
    /// Word-count driven assuredness, capped at 15 words.
    pub confidence: Score,
    /// Fraction of tokens carrying an intensifier keyword.
    pub energy: Score,
    /// Word-count driven expressiveness, capped at 30 words.
    pub verbosity: Score,
    /// Fraction of tokens carrying a hedge keyword.
    pub hesitation: Score,
    /// Composite openness measure (see `ResponseAnalyzer`).
    pub authenticity: Score,
}

impl ToneVector {
    /// Creates a tone vector from raw dimension values, clamping each.
    pub fn new(
        confidence: f64,
        energy: f64,
        verbosity: f64,
        hesitation: f64,
        authenticity: f64,
    ) -> Self {
        Self {
            confidence: Score::new(confidence),
            energy: Score::new(energy),
            verbosity: Score::new(verbosity),
            hesitation: Score::new(hesitation),
            authenticity: Score::new(authenticity),
        }
    }
}
