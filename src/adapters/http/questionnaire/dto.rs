//! HTTP DTOs for questionnaire endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.
//!
//! Authentication lives in the hosted identity layer in front of this
//! service, so requests carry the already-authenticated user id directly.

use serde::{Deserialize, Serialize};

use crate::application::handlers::questionnaire::{NarrativeSource, QuestionSource};
use crate::domain::analysis::ToneVector;
use crate::domain::profile::{AggregateStats, PsychologicalProfile};
use crate::domain::session::Answer;
use crate::ports::{AstrologyContext, StoreOutcome};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to start a new questionnaire session.
#[derive(Debug, Clone, Deserialize)]
pub struct StartQuestionnaireRequest {
    pub user_id: String,
    #[serde(default)]
    pub completion_threshold: Option<usize>,
}

/// Request to submit an answer.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAnswerRequest {
    pub user_id: String,
    pub question_id: u32,
    pub question_text: String,
    pub answer_text: String,
    #[serde(default)]
    pub response_time_seconds: u32,
}

/// Query parameters for the next-question endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct NextQuestionQuery {
    pub user_id: String,
}

/// Request to complete a session.
#[derive(Debug, Clone, Deserialize)]
pub struct CompleteQuestionnaireRequest {
    pub user_id: String,
}

/// Request to generate a narrative report.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateReportRequest {
    pub user_id: String,
    pub profile_id: String,
    pub sun_sign: String,
    pub moon_sign: String,
    pub rising_sign: String,
}

impl GenerateReportRequest {
    pub fn astrology(&self) -> AstrologyContext {
        AstrologyContext {
            sun_sign: self.sun_sign.clone(),
            moon_sign: self.moon_sign.clone(),
            rising_sign: self.rising_sign.clone(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Response for session start.
#[derive(Debug, Clone, Serialize)]
pub struct StartQuestionnaireResponse {
    pub session_id: String,
    pub question_id: u32,
    pub question_text: String,
    pub completion_threshold: usize,
}

/// Per-answer analysis echoed back to the client.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerResponse {
    pub question_id: u32,
    pub emotion: String,
    pub word_count: u32,
    pub tone: ToneResponse,
}

impl From<&Answer> for AnswerResponse {
    fn from(answer: &Answer) -> Self {
        Self {
            question_id: answer.question_id().value(),
            emotion: answer.emotion().to_string(),
            word_count: answer.word_count(),
            tone: answer.tone().into(),
        }
    }
}

/// Tone vector as plain numbers.
#[derive(Debug, Clone, Serialize)]
pub struct ToneResponse {
    pub confidence: f64,
    pub energy: f64,
    pub verbosity: f64,
    pub hesitation: f64,
    pub authenticity: f64,
}

impl From<&ToneVector> for ToneResponse {
    fn from(tone: &ToneVector) -> Self {
        Self {
            confidence: tone.confidence.value(),
            energy: tone.energy.value(),
            verbosity: tone.verbosity.value(),
            hesitation: tone.hesitation.value(),
            authenticity: tone.authenticity.value(),
        }
    }
}

/// Response for answer submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitAnswerResponse {
    pub answer: AnswerResponse,
    pub session_completed: bool,
    pub answers_recorded: usize,
    /// True when the answer only reached the local cache.
    pub degraded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded_reason: Option<String>,
}

/// Response for the next-question endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct NextQuestionResponse {
    pub question_id: u32,
    pub question_text: String,
    /// "generated" or "fallback".
    pub source: String,
}

pub fn question_source_str(source: QuestionSource) -> &'static str {
    match source {
        QuestionSource::Generated => "generated",
        QuestionSource::Fallback => "fallback",
    }
}

pub fn narrative_source_str(source: NarrativeSource) -> &'static str {
    match source {
        NarrativeSource::Generated => "generated",
        NarrativeSource::Template => "template",
    }
}

/// Profile payload for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub archetype: String,
    pub motivational_type: String,
    pub communication_mode: String,
    pub core_traits: Vec<String>,
    pub shadow_traits: Vec<String>,
    pub dominant_emotion: String,
    pub stats: StatsResponse,
}

impl From<&PsychologicalProfile> for ProfileResponse {
    fn from(profile: &PsychologicalProfile) -> Self {
        Self {
            archetype: profile.archetype.clone(),
            motivational_type: profile.motivational_type.clone(),
            communication_mode: profile.communication_mode.clone(),
            core_traits: profile.core_traits.clone(),
            shadow_traits: profile.shadow_traits.clone(),
            dominant_emotion: profile.dominant_emotion.to_string(),
            stats: (&profile.stats).into(),
        }
    }
}

/// Aggregate statistics for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub answer_count: u32,
    pub average_word_count: f64,
    pub average_response_time_seconds: f64,
    pub mean_tone: ToneResponse,
    pub emotion_counts: Vec<(String, u32)>,
    pub distinct_emotion_count: u32,
}

impl From<&AggregateStats> for StatsResponse {
    fn from(stats: &AggregateStats) -> Self {
        Self {
            answer_count: stats.answer_count,
            average_word_count: stats.average_word_count,
            average_response_time_seconds: stats.average_response_time_seconds,
            mean_tone: (&stats.mean_tone).into(),
            emotion_counts: stats
                .emotion_counts
                .iter()
                .map(|(emotion, count)| (emotion.to_string(), *count))
                .collect(),
            distinct_emotion_count: stats.distinct_emotion_count,
        }
    }
}

/// Response for session completion.
#[derive(Debug, Clone, Serialize)]
pub struct CompleteQuestionnaireResponse {
    pub profile_id: String,
    pub profile: ProfileResponse,
    pub degraded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded_reason: Option<String>,
}

/// Response for report generation.
#[derive(Debug, Clone, Serialize)]
pub struct ReportResponse {
    pub profile: ProfileResponse,
    pub sun_sign: String,
    pub moon_sign: String,
    pub rising_sign: String,
    pub narrative: String,
    /// "generated" or "template".
    pub source: String,
}

/// Error payload for all questionnaire endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }
}

/// Splits a store outcome into the (degraded, reason) response pair.
pub fn degraded_fields(outcome: &StoreOutcome) -> (bool, Option<String>) {
    match outcome {
        StoreOutcome::Stored => (false, None),
        StoreOutcome::Degraded { reason } => (true, Some(reason.clone())),
    }
}
