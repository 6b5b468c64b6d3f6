//! Response analyzer - deterministic scoring of a single free-text answer.
//!
//! This is the leaf of the heuristic core: a total, pure function from any
//! string to an emotion label and a tone vector. It holds no mutable state
//! and is safe to share across concurrent sessions.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Score;

use super::{Emotion, Lexicon, ToneVector};

/// Word count at which confidence saturates.
const CONFIDENCE_CAP_WORDS: f64 = 15.0;

/// Word count at which verbosity saturates.
const VERBOSITY_CAP_WORDS: f64 = 30.0;

/// Tokens longer than this count toward the long-word fraction.
const LONG_TOKEN_CHARS: usize = 6;

/// Base floor of the composite authenticity formula.
const AUTHENTICITY_BASE: f64 = 0.3;

/// Which authenticity formula the analyzer applies.
///
/// The composite formula is the canonical choice; the hesitation-weighted
/// variant is retained as a configuration option for flows that used it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthenticityFormula {
    /// 0.3 base + first-person, long-token, and emotion-token fractions,
    /// weighted 0.3/0.3/0.2, plus (1 - hesitation) x 0.2.
    #[default]
    Composite,
    /// max(0.3, 1 - hesitation x 0.4 + confidence x 0.3 - energy x 0.2).
    Weighted,
}

/// Result of analyzing one answer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResponseAnalysis {
    /// Detected emotion label (`Neutral` when nothing matches).
    pub emotion: Emotion,
    /// Scored tone dimensions, each in [0, 1].
    pub tone: ToneVector,
    /// Whitespace-delimited token count of the input.
    pub word_count: u32,
}

/// Deterministic keyword-based analyzer for questionnaire answers.
///
/// # Guarantees
///
/// - Total: never fails, for any input including the empty string.
/// - Deterministic: identical input yields identical output.
/// - Tie-break: emotions are scanned in [`Emotion::ALL`] order with a
///   strict greater-than comparison, so the earlier label wins ties and
///   zero matches resolve to `Neutral`.
#[derive(Debug, Clone)]
pub struct ResponseAnalyzer {
    lexicon: Lexicon,
    authenticity_formula: AuthenticityFormula,
}

impl ResponseAnalyzer {
    /// Creates an analyzer with the given lexicon and formula choice.
    pub fn new(lexicon: Lexicon, authenticity_formula: AuthenticityFormula) -> Self {
        Self {
            lexicon,
            authenticity_formula,
        }
    }

    /// Creates an analyzer with the default content lexicon.
    pub fn with_defaults() -> Self {
        Self::new(Lexicon::default(), AuthenticityFormula::default())
    }

    /// Analyzes a single answer text.
    ///
    /// Empty or non-linguistic input yields a degenerate neutral result
    /// rather than an error.
    pub fn analyze(&self, text: &str) -> ResponseAnalysis {
        let normalized = text.to_lowercase();
        let tokens: Vec<&str> = normalized.split_whitespace().collect();
        let word_count = tokens.len();

        let emotion = self.detect_emotion(&tokens);

        let wc = word_count as f64;
        let divisor = wc.max(1.0);

        let confidence = (wc / CONFIDENCE_CAP_WORDS).min(1.0);
        let verbosity = (wc / VERBOSITY_CAP_WORDS).min(1.0);

        let energy = Self::count_matching(&tokens, &self.lexicon.intensifiers) / divisor;
        let hesitation = Self::count_matching(&tokens, &self.lexicon.hedges) / divisor;

        let authenticity = self.authenticity(&tokens, divisor, confidence, energy, hesitation);

        ResponseAnalysis {
            emotion,
            tone: ToneVector::new(confidence, energy, verbosity, hesitation, authenticity),
            word_count: word_count as u32,
        }
    }

    /// Counts keyword matches per emotion and returns the strict winner.
    fn detect_emotion(&self, tokens: &[&str]) -> Emotion {
        let mut best = Emotion::Neutral;
        let mut best_count = 0usize;

        for (emotion, keywords) in &self.lexicon.emotion_keywords {
            let count = keywords
                .iter()
                .filter(|k| tokens.iter().any(|t| t.contains(k.as_str())))
                .count();
            if count > best_count {
                best = *emotion;
                best_count = count;
            }
        }

        best
    }

    /// Number of tokens containing any keyword from the list, as f64.
    fn count_matching(tokens: &[&str], keywords: &[String]) -> f64 {
        tokens
            .iter()
            .filter(|t| Lexicon::token_matches_any(t, keywords))
            .count() as f64
    }

    fn authenticity(
        &self,
        tokens: &[&str],
        divisor: f64,
        confidence: f64,
        energy: f64,
        hesitation: f64,
    ) -> f64 {
        match self.authenticity_formula {
            AuthenticityFormula::Composite => {
                let first_person = tokens
                    .iter()
                    .filter(|t| self.lexicon.first_person.iter().any(|p| p == *t))
                    .count() as f64
                    / divisor;
                let long_tokens = tokens
                    .iter()
                    .filter(|t| t.chars().count() > LONG_TOKEN_CHARS)
                    .count() as f64
                    / divisor;
                let emotional = tokens
                    .iter()
                    .filter(|t| self.lexicon.token_is_emotional(t))
                    .count() as f64
                    / divisor;

                AUTHENTICITY_BASE
                    + first_person * 0.3
                    + long_tokens * 0.3
                    + emotional * 0.2
                    + (1.0 - hesitation) * 0.2
            }
            AuthenticityFormula::Weighted => {
                (1.0 - hesitation * 0.4 + confidence * 0.3 - energy * 0.2).max(AUTHENTICITY_BASE)
            }
        }
    }
}

impl Default for ResponseAnalyzer {
    fn default() -> Self {
        Self::with_defaults()
    }
}
