//! Answer entity - one analyzed response to one prompt.

use serde::{Deserialize, Serialize};

use crate::domain::analysis::{Emotion, ResponseAnalysis, ToneVector};
use crate::domain::foundation::{DomainError, QuestionId};

/// One response to one questionnaire prompt.
///
/// # Invariants
///
/// - `answer_text` is non-empty after trimming
/// - `tone` fields are always in [0, 1] (enforced by [`ToneVector`])
/// - `emotion` is always a member of the fixed label set
/// - Immutable once created: produced once by the analyzer, never mutated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    /// Position of the question within the session.
    question_id: QuestionId,

    /// The prompt that was shown.
    question_text: String,

    /// Raw user input.
    answer_text: String,

    /// Elapsed seconds between question display and submission.
    response_time_seconds: u32,

    /// Whitespace-delimited token count of `answer_text`.
    word_count: u32,

    /// Detected emotion label.
    emotion: Emotion,

    /// Scored tone dimensions.
    tone: ToneVector,
}

impl Answer {
    /// Creates an Answer from raw input and its analysis.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the answer text is empty after trimming
    pub fn new(
        question_id: QuestionId,
        question_text: impl Into<String>,
        answer_text: impl Into<String>,
        response_time_seconds: u32,
        analysis: ResponseAnalysis,
    ) -> Result<Self, DomainError> {
        let answer_text = answer_text.into();
        if answer_text.trim().is_empty() {
            return Err(DomainError::validation(
                "answer_text",
                "Answer text cannot be empty",
            ));
        }

        Ok(Self {
            question_id,
            question_text: question_text.into(),
            answer_text,
            response_time_seconds,
            word_count: analysis.word_count,
            emotion: analysis.emotion,
            tone: analysis.tone,
        })
    }

    /// Reconstitute an answer from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        question_id: QuestionId,
        question_text: String,
        answer_text: String,
        response_time_seconds: u32,
        word_count: u32,
        emotion: Emotion,
        tone: ToneVector,
    ) -> Self {
        Self {
            question_id,
            question_text,
            answer_text,
            response_time_seconds,
            word_count,
            emotion,
            tone,
        }
    }

    /// Returns the question position.
    pub fn question_id(&self) -> QuestionId {
        self.question_id
    }

    /// Returns the prompt text.
    pub fn question_text(&self) -> &str {
        &self.question_text
    }

    /// Returns the raw answer text.
    pub fn answer_text(&self) -> &str {
        &self.answer_text
    }

    /// Returns the response time in seconds.
    pub fn response_time_seconds(&self) -> u32 {
        self.response_time_seconds
    }

    /// Returns the derived word count.
    pub fn word_count(&self) -> u32 {
        self.word_count
    }

    /// Returns the detected emotion.
    pub fn emotion(&self) -> Emotion {
        self.emotion
    }

    /// Returns the tone vector.
    pub fn tone(&self) -> &ToneVector {
        &self.tone
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::ResponseAnalyzer;

    fn analyzed(text: &str) -> ResponseAnalysis {
        ResponseAnalyzer::with_defaults().analyze(text)
    }

    #[test]
    fn new_answer_carries_analysis_fields() {
        let text = "I am fine today";
        let answer = Answer::new(
            QuestionId::new(1),
            "How are you feeling?",
            text,
            12,
            analyzed(text),
        )
        .unwrap();

        assert_eq!(answer.word_count(), 4);
        assert_eq!(answer.emotion(), Emotion::Neutral);
        assert_eq!(answer.response_time_seconds(), 12);
        assert_eq!(answer.answer_text(), text);
    }

    #[test]
    fn new_answer_rejects_empty_text() {
        let result = Answer::new(QuestionId::new(1), "Prompt", "", 5, analyzed(""));
        assert!(result.is_err());
    }

    #[test]
    fn new_answer_rejects_whitespace_text() {
        let result = Answer::new(QuestionId::new(1), "Prompt", "   ", 5, analyzed("   "));
        assert!(result.is_err());
    }

    #[test]
    fn answer_serializes_round_trip() {
        let text = "I wonder what tomorrow brings";
        let answer = Answer::new(QuestionId::new(3), "Prompt", text, 8, analyzed(text)).unwrap();

        let json = serde_json::to_string(&answer).unwrap();
        let back: Answer = serde_json::from_str(&json).unwrap();
        assert_eq!(answer, back);
    }
}
