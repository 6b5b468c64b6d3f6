//! Keyword lexicon used by the response analyzer.
//!
//! The word lists are content configuration, not algorithm: behavioral
//! variants of the analyzer differ only in which lexicon they are given.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::Emotion;

/// Keyword lists driving emotion detection and tone scoring.
///
/// All keywords are matched lowercase. Emotion keywords, intensifiers, and
/// hedges match as substrings of a token ("amazingly" matches "amazing");
/// first-person pronouns match whole tokens only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lexicon {
    /// Keywords per emotion, in detection order. `Neutral` has no entry.
    pub emotion_keywords: Vec<(Emotion, Vec<String>)>,
    /// Substrings signalling high energy ("really", "extremely", ...).
    pub intensifiers: Vec<String>,
    /// Substrings signalling hesitation ("maybe", "perhaps", ...).
    pub hedges: Vec<String>,
    /// First-person pronoun tokens, matched exactly.
    pub first_person: Vec<String>,
}

impl Lexicon {
    /// Returns the keyword list for an emotion (empty for `Neutral`).
    pub fn keywords_for(&self, emotion: Emotion) -> &[String] {
        self.emotion_keywords
            .iter()
            .find(|(e, _)| *e == emotion)
            .map(|(_, words)| words.as_slice())
            .unwrap_or(&[])
    }

    /// Checks whether a token contains any keyword from the list.
    pub fn token_matches_any(token: &str, keywords: &[String]) -> bool {
        keywords.iter().any(|k| token.contains(k.as_str()))
    }

    /// Checks whether a token matches any emotion keyword across all emotions.
    pub fn token_is_emotional(&self, token: &str) -> bool {
        self.emotion_keywords
            .iter()
            .any(|(_, words)| Self::token_matches_any(token, words))
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        DEFAULT_LEXICON.clone()
    }
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

/// Default content lexicon shared by every questionnaire flow.
static DEFAULT_LEXICON: Lazy<Lexicon> = Lazy::new(|| Lexicon {
    emotion_keywords: vec![
        (
            Emotion::Joy,
            words(&[
                "happy", "joy", "excited", "love", "wonderful", "amazing", "delight", "grateful",
                "thrill",
            ]),
        ),
        (
            Emotion::Sadness,
            words(&["sad", "lonely", "miss", "cry", "grief", "hurt", "lost", "empty"]),
        ),
        (
            Emotion::Anger,
            words(&["angry", "furious", "hate", "rage", "annoyed", "frustrat", "resent"]),
        ),
        (
            Emotion::Fear,
            words(&["afraid", "scared", "anxious", "worry", "nervous", "dread", "terrified"]),
        ),
        (
            Emotion::Surprise,
            words(&["surprised", "unexpected", "shock", "sudden", "astonish", "stunned"]),
        ),
        (
            Emotion::Contemplative,
            words(&["wonder", "reflect", "ponder", "question", "consider", "realize", "meaning"]),
        ),
        (
            Emotion::Confident,
            words(&["certain", "definitely", "absolutely", "confident", "believe", "determined"]),
        ),
        (
            Emotion::Vulnerable,
            words(&["struggle", "difficult", "admit", "confess", "insecure", "fragile", "ashamed"]),
        ),
    ],
    intensifiers: words(&[
        "really",
        "very",
        "extremely",
        "absolutely",
        "incredibly",
        "totally",
        "deeply",
        "utterly",
        "intensely",
    ]),
    hedges: words(&[
        "maybe",
        "perhaps",
        "possibly",
        "might",
        "guess",
        "unsure",
        "probably",
        "think",
        "kinda",
        "sorta",
    ]),
    first_person: words(&["i", "i'm", "i've", "i'll", "i'd", "me", "my", "mine", "myself"]),
});
