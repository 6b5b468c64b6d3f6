//! NextQuestionHandler - Command handler for producing the next question.
//!
//! Generation is best effort: the prompt is built from the answers so far,
//! handed to the remote generator, and any failure falls back to the fixed
//! question list without surfacing an error to the caller.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, QuestionId, SessionId, UserId};
use crate::domain::session::Session;
use crate::ports::{GenerationRequest, SessionRepository, TextGenerator};

use super::questions::{fallback_question, phase_for_progress};

const QUESTION_MAX_TOKENS: u32 = 120;

const QUESTION_SYSTEM_PROMPT: &str = "You are a thoughtful interviewer for a \
personality questionnaire. Ask exactly one open-ended question, in one \
sentence, with no preamble and no numbering.";

/// Command to produce the next question for an open session.
#[derive(Debug, Clone)]
pub struct NextQuestionCommand {
    pub session_id: SessionId,
    pub user_id: UserId,
}

/// Where the returned question came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionSource {
    Generated,
    Fallback,
}

/// Result carrying the next question and its position.
#[derive(Debug, Clone)]
pub struct NextQuestionResult {
    pub question_id: QuestionId,
    pub question_text: String,
    pub source: QuestionSource,
}

/// Handler for next-question generation.
pub struct NextQuestionHandler {
    repository: Arc<dyn SessionRepository>,
    generator: Arc<dyn TextGenerator>,
}

impl NextQuestionHandler {
    pub fn new(repository: Arc<dyn SessionRepository>, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            repository,
            generator,
        }
    }

    pub async fn handle(&self, cmd: NextQuestionCommand) -> Result<NextQuestionResult, DomainError> {
        let session = self
            .repository
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::SessionNotFound,
                    format!("Session {} not found", cmd.session_id),
                )
            })?;

        session.authorize(&cmd.user_id)?;

        if session.is_complete() {
            return Err(DomainError::new(
                ErrorCode::SessionComplete,
                "Session has already reached its completion threshold",
            ));
        }

        let question_id = session.next_question_id();
        let answered = session.answer_count();
        let phase = phase_for_progress(answered, session.completion_threshold());

        let request = GenerationRequest::new(
            build_prompt(&session, phase.label()),
            phase,
            cmd.user_id,
            cmd.session_id,
        )
        .with_system_prompt(QUESTION_SYSTEM_PROMPT)
        .with_max_tokens(QUESTION_MAX_TOKENS);

        let (question_text, source) = match self.generator.generate(request).await {
            Ok(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    tracing::warn!(
                        session_id = %cmd.session_id,
                        "generator returned empty question, using fallback"
                    );
                    (fallback_question(answered).to_string(), QuestionSource::Fallback)
                } else {
                    (trimmed.to_string(), QuestionSource::Generated)
                }
            }
            Err(err) => {
                tracing::warn!(
                    session_id = %cmd.session_id,
                    error = %err,
                    retryable = err.is_retryable(),
                    "question generation failed, using fallback"
                );
                (fallback_question(answered).to_string(), QuestionSource::Fallback)
            }
        };

        Ok(NextQuestionResult {
            question_id,
            question_text,
            source,
        })
    }
}

fn build_prompt(session: &Session, phase_label: &str) -> String {
    let mut prompt = format!(
        "Questionnaire phase: {phase_label}. The user has answered {} of {} questions.\n\n",
        session.answer_count(),
        session.completion_threshold(),
    );
    for answer in session.answers() {
        prompt.push_str(&format!(
            "Q{}: {}\nA (emotion: {}): {}\n\n",
            answer.question_id(),
            answer.question_text(),
            answer.emotion(),
            answer.answer_text(),
        ));
    }
    prompt.push_str("Write the next question.");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::questionnaire::testing::{
        MockSessionRepository, MockTextGenerator,
    };
    use crate::domain::analysis::ResponseAnalyzer;
    use crate::domain::session::Answer;
    use crate::ports::QuestionnairePhase;

    fn test_user_id() -> UserId {
        UserId::new("user-123").unwrap()
    }

    fn session_with_answers(count: u32, threshold: usize) -> Session {
        let mut session = Session::with_threshold(SessionId::new(), test_user_id(), threshold);
        let analyzer = ResponseAnalyzer::with_defaults();
        for i in 1..=count {
            let answer = Answer::new(
                QuestionId::new(i),
                format!("Question {i}"),
                "A perfectly ordinary reply",
                10,
                analyzer.analyze("A perfectly ordinary reply"),
            )
            .unwrap();
            session.append_answer(answer).unwrap();
        }
        session
    }

    fn command(session_id: SessionId) -> NextQuestionCommand {
        NextQuestionCommand {
            session_id,
            user_id: test_user_id(),
        }
    }

    #[tokio::test]
    async fn returns_generated_question_with_context_prompt() {
        let session = session_with_answers(2, 9);
        let session_id = *session.id();
        let generator = Arc::new(MockTextGenerator::replying(
            "What keeps you grounded when things change?",
        ));
        let handler = NextQuestionHandler::new(
            Arc::new(MockSessionRepository::with_session(session)),
            generator.clone(),
        );

        let result = handler.handle(command(session_id)).await.unwrap();

        assert_eq!(result.source, QuestionSource::Generated);
        assert_eq!(result.question_id, QuestionId::new(3));
        assert_eq!(
            result.question_text,
            "What keeps you grounded when things change?"
        );

        let requests = generator.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].phase, QuestionnairePhase::Deepening);
        assert!(requests[0].prompt.contains("Question 2"));
        assert!(requests[0].prompt.contains("answered 2 of 9"));
    }

    #[tokio::test]
    async fn falls_back_when_generation_fails() {
        let session = session_with_answers(3, 9);
        let session_id = *session.id();
        let handler = NextQuestionHandler::new(
            Arc::new(MockSessionRepository::with_session(session)),
            Arc::new(MockTextGenerator::failing()),
        );

        let result = handler.handle(command(session_id)).await.unwrap();

        assert_eq!(result.source, QuestionSource::Fallback);
        assert_eq!(result.question_text, fallback_question(3));
    }

    #[tokio::test]
    async fn falls_back_when_generation_returns_blank() {
        let session = session_with_answers(1, 9);
        let session_id = *session.id();
        let handler = NextQuestionHandler::new(
            Arc::new(MockSessionRepository::with_session(session)),
            Arc::new(MockTextGenerator::replying("   \n")),
        );

        let result = handler.handle(command(session_id)).await.unwrap();

        assert_eq!(result.source, QuestionSource::Fallback);
    }

    #[tokio::test]
    async fn rejects_completed_session() {
        let session = session_with_answers(2, 2);
        let session_id = *session.id();
        let handler = NextQuestionHandler::new(
            Arc::new(MockSessionRepository::with_session(session)),
            Arc::new(MockTextGenerator::replying("unused")),
        );

        let err = handler.handle(command(session_id)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionComplete);
    }

    #[tokio::test]
    async fn rejects_unknown_session() {
        let handler = NextQuestionHandler::new(
            Arc::new(MockSessionRepository::empty()),
            Arc::new(MockTextGenerator::replying("unused")),
        );

        let err = handler.handle(command(SessionId::new())).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionNotFound);
    }
}
