//! Emotion label - fixed closed set of detectable emotions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// One of the fixed emotion labels an answer can be classified into.
///
/// The declaration order is significant: emotion detection iterates the
/// labels in this order with a strict greater-than comparison, so when two
/// emotions tie on keyword matches the earlier label wins. `Neutral` is the
/// zero-match default and carries no keywords of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Joy,
    Sadness,
    Anger,
    Fear,
    Surprise,
    Contemplative,
    Confident,
    Vulnerable,
    Neutral,
}

impl Emotion {
    /// All labels in detection order.
    pub const ALL: [Emotion; 9] = [
        Emotion::Joy,
        Emotion::Sadness,
        Emotion::Anger,
        Emotion::Fear,
        Emotion::Surprise,
        Emotion::Contemplative,
        Emotion::Confident,
        Emotion::Vulnerable,
        Emotion::Neutral,
    ];

    /// Returns the lowercase label string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Joy => "joy",
            Emotion::Sadness => "sadness",
            Emotion::Anger => "anger",
            Emotion::Fear => "fear",
            Emotion::Surprise => "surprise",
            Emotion::Contemplative => "contemplative",
            Emotion::Confident => "confident",
            Emotion::Vulnerable => "vulnerable",
            Emotion::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "joy" => Ok(Emotion::Joy),
            "sadness" => Ok(Emotion::Sadness),
            "anger" => Ok(Emotion::Anger),
            "fear" => Ok(Emotion::Fear),
            "surprise" => Ok(Emotion::Surprise),
            "contemplative" => Ok(Emotion::Contemplative),
            "confident" => Ok(Emotion::Confident),
            "vulnerable" => Ok(Emotion::Vulnerable),
            "neutral" => Ok(Emotion::Neutral),
            other => Err(ValidationError::invalid_format(
                "emotion",
                format!("unknown label '{}'", other),
            )),
        }
    }
}
