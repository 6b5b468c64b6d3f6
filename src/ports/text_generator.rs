//! Text Generator Port - interface for the remote generative-text service.
//!
//! The service is treated as an opaque, unreliable remote function: prompt
//! in, free text out. Callers wrap it with a fallback policy and must never
//! let a generation failure block the questionnaire flow.

use async_trait::async_trait;

use crate::domain::foundation::{SessionId, UserId};

/// Phase of the questionnaire a generation request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionnairePhase {
    /// Early grounding questions.
    Opening,
    /// Deeper follow-up questions driven by prior answers.
    Deepening,
    /// Closing reflection questions.
    Closing,
    /// Post-aggregation narrative enrichment.
    Enrichment,
}

impl QuestionnairePhase {
    /// Returns the phase label used in prompts.
    pub fn label(&self) -> &'static str {
        match self {
            QuestionnairePhase::Opening => "opening",
            QuestionnairePhase::Deepening => "deepening",
            QuestionnairePhase::Closing => "closing",
            QuestionnairePhase::Enrichment => "enrichment",
        }
    }
}

/// Request for a single text generation.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Full prompt text, built by the caller from accumulated answers.
    pub prompt: String,
    /// System instructions guiding the model.
    pub system_prompt: Option<String>,
    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,
    /// Phase label for tracing.
    pub phase: QuestionnairePhase,
    /// User making the request.
    pub user_id: UserId,
    /// Session context for the request.
    pub session_id: SessionId,
}

impl GenerationRequest {
    /// Creates a request with the given prompt and context.
    pub fn new(
        prompt: impl Into<String>,
        phase: QuestionnairePhase,
        user_id: UserId,
        session_id: SessionId,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            system_prompt: None,
            max_tokens: None,
            phase,
            user_id,
            session_id,
        }
    }

    /// Sets the system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Sets the maximum tokens to generate.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }
}

/// Port for remote text generation.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates text for the given request.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` on any remote failure; callers decide
    /// whether to retry, fall back, or surface the error.
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError>;
}

/// Text generation errors.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Rate limited by the provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },
}

impl GenerationError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Whether a retry could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GenerationError::RateLimited { .. }
                | GenerationError::Unavailable { .. }
                | GenerationError::Network(_)
                | GenerationError::Timeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_classification() {
        assert!(GenerationError::network("connection reset").is_retryable());
        assert!(GenerationError::RateLimited { retry_after_secs: 5 }.is_retryable());
        assert!(!GenerationError::AuthenticationFailed.is_retryable());
        assert!(!GenerationError::parse("bad json").is_retryable());
    }

    #[test]
    fn phase_labels_are_stable() {
        assert_eq!(QuestionnairePhase::Opening.label(), "opening");
        assert_eq!(QuestionnairePhase::Enrichment.label(), "enrichment");
    }

    #[test]
    fn request_builder_sets_fields() {
        let request = GenerationRequest::new(
            "prompt",
            QuestionnairePhase::Deepening,
            UserId::new("u1").unwrap(),
            SessionId::new(),
        )
        .with_system_prompt("system")
        .with_max_tokens(256);

        assert_eq!(request.system_prompt.as_deref(), Some("system"));
        assert_eq!(request.max_tokens, Some(256));
        assert_eq!(request.phase, QuestionnairePhase::Deepening);
    }
}
