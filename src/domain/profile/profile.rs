//! PsychologicalProfile - the aggregate derived from a completed session.

use serde::{Deserialize, Serialize};

use crate::domain::analysis::{Emotion, ToneVector};
use crate::domain::session::Answer;

/// Summary statistics rolled up from a session's answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    /// Number of answers aggregated.
    pub answer_count: u32,
    /// Mean word count across answers.
    pub average_word_count: f64,
    /// Mean response time in seconds.
    pub average_response_time_seconds: f64,
    /// Mean of each tone dimension, rounded to 2 decimals.
    pub mean_tone: ToneVector,
    /// Emotion frequency histogram, in first-seen order.
    pub emotion_counts: Vec<(Emotion, u32)>,
    /// Number of distinct emotions observed.
    pub distinct_emotion_count: u32,
}

/// Personality profile derived from one completed session.
///
/// A value object: owned by the caller that requested aggregation, with no
/// back-reference to the session and no further mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PsychologicalProfile {
    /// Archetype name from the ordered decision list.
    pub archetype: String,
    /// Motivational type co-selected with the archetype.
    pub motivational_type: String,
    /// Communication mode co-selected with the archetype.
    pub communication_mode: String,
    /// Traits included by core threshold tests (may be empty).
    pub core_traits: Vec<String>,
    /// Traits included by shadow threshold tests (may be empty).
    pub shadow_traits: Vec<String>,
    /// Most frequent emotion, ties broken first-encountered-wins.
    pub dominant_emotion: Emotion,
    /// Summary statistics.
    pub stats: AggregateStats,
    /// The raw per-answer list the profile was derived from.
    pub answers: Vec<Answer>,
}
