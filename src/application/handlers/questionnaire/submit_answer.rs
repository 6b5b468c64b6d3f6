//! SubmitAnswerHandler - Command handler for recording one answer.
//!
//! Runs the response analysis, appends the answer to the session aggregate,
//! and pushes the record to durable storage. A durable-store failure never
//! fails the command: the answer is cached locally and the degraded outcome
//! is surfaced in the result.

use std::sync::Arc;

use crate::domain::analysis::ResponseAnalyzer;
use crate::domain::foundation::{DomainError, ErrorCode, QuestionId, SessionId, UserId};
use crate::domain::session::Answer;
use crate::ports::{AnswerCache, QuestionnaireStore, SessionRepository, StoreOutcome};

/// Command to submit an answer to an open session.
#[derive(Debug, Clone)]
pub struct SubmitAnswerCommand {
    pub session_id: SessionId,
    pub user_id: UserId,
    pub question_id: QuestionId,
    pub question_text: String,
    pub answer_text: String,
    pub response_time_seconds: u32,
}

/// Result of a successful answer submission.
#[derive(Debug, Clone)]
pub struct SubmitAnswerResult {
    pub answer: Answer,
    /// Whether this answer completed the session.
    pub session_completed: bool,
    /// How many answers the session now holds.
    pub answers_recorded: usize,
    /// Where the answer record landed.
    pub store_outcome: StoreOutcome,
}

/// Handler for answer submission.
pub struct SubmitAnswerHandler {
    repository: Arc<dyn SessionRepository>,
    store: Arc<dyn QuestionnaireStore>,
    cache: Arc<dyn AnswerCache>,
    analyzer: ResponseAnalyzer,
}

impl SubmitAnswerHandler {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        store: Arc<dyn QuestionnaireStore>,
        cache: Arc<dyn AnswerCache>,
        analyzer: ResponseAnalyzer,
    ) -> Self {
        Self {
            repository,
            store,
            cache,
            analyzer,
        }
    }

    pub async fn handle(&self, cmd: SubmitAnswerCommand) -> Result<SubmitAnswerResult, DomainError> {
        // 1. Load and authorize
        let mut session = self
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

        // 2. Analyze and append
        let analysis = self.analyzer.analyze(&cmd.answer_text);
        let answer = Answer::new(
            cmd.question_id,
            cmd.question_text,
            cmd.answer_text,
            cmd.response_time_seconds,
            analysis,
        )?;

        let session_completed = session.append_answer(answer.clone())?;

        // 3. Persist the aggregate before the side store; the session is
        // the source of truth for replay.
        self.repository.update(&session).await?;

        // 4. Durable store with degraded fallback
        let store_outcome = match self
            .store
            .store_answer(&cmd.user_id, &cmd.session_id, &answer)
            .await
        {
            Ok(()) => StoreOutcome::Stored,
            Err(err) => {
                tracing::warn!(
                    session_id = %cmd.session_id,
                    question_id = %answer.question_id(),
                    error = %err,
                    "durable answer store failed, caching locally"
                );
                self.cache
                    .cache_answer(&cmd.session_id, &answer)
                    .await
                    .map_err(|cache_err| {
                        DomainError::new(
                            ErrorCode::StorageError,
                            format!("Answer store and cache both failed: {cache_err}"),
                        )
                    })?;
                StoreOutcome::degraded(err.to_string())
            }
        };

        tracing::info!(
            session_id = %cmd.session_id,
            question_id = %answer.question_id(),
            emotion = %answer.emotion(),
            completed = session_completed,
            "answer recorded"
        );

        Ok(SubmitAnswerResult {
            answer,
            session_completed,
            answers_recorded: session.answer_count(),
            store_outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::questionnaire::testing::{
        MockAnswerCache, MockQuestionnaireStore, MockSessionRepository,
    };
    use crate::domain::session::Session;

    fn test_user_id() -> UserId {
        UserId::new("user-123").unwrap()
    }

    fn handler_with(
        repository: Arc<MockSessionRepository>,
        store: Arc<MockQuestionnaireStore>,
        cache: Arc<MockAnswerCache>,
    ) -> SubmitAnswerHandler {
        SubmitAnswerHandler::new(repository, store, cache, ResponseAnalyzer::with_defaults())
    }

    fn command(session_id: SessionId, question_id: u32, text: &str) -> SubmitAnswerCommand {
        SubmitAnswerCommand {
            session_id,
            user_id: test_user_id(),
            question_id: QuestionId::new(question_id),
            question_text: "What matters to you?".to_string(),
            answer_text: text.to_string(),
            response_time_seconds: 12,
        }
    }

    #[tokio::test]
    async fn submit_analyzes_appends_and_stores() {
        let session = Session::with_threshold(SessionId::new(), test_user_id(), 3);
        let session_id = *session.id();
        let repository = Arc::new(MockSessionRepository::with_session(session));
        let store = Arc::new(MockQuestionnaireStore::new());
        let cache = Arc::new(MockAnswerCache::new());
        let handler = handler_with(repository.clone(), store.clone(), cache.clone());

        let result = handler
            .handle(command(session_id, 1, "I am really excited about this"))
            .await
            .unwrap();

        assert!(!result.session_completed);
        assert_eq!(result.answers_recorded, 1);
        assert!(result.store_outcome.is_stored());
        assert_eq!(store.stored_answers().len(), 1);
        assert!(cache.cached_answers_for(&session_id).is_empty());
    }

    #[tokio::test]
    async fn submit_reports_completion_at_threshold() {
        let session = Session::with_threshold(SessionId::new(), test_user_id(), 2);
        let session_id = *session.id();
        let repository = Arc::new(MockSessionRepository::with_session(session));
        let handler = handler_with(
            repository.clone(),
            Arc::new(MockQuestionnaireStore::new()),
            Arc::new(MockAnswerCache::new()),
        );

        let first = handler
            .handle(command(session_id, 1, "First answer here"))
            .await
            .unwrap();
        assert!(!first.session_completed);

        let second = handler
            .handle(command(session_id, 2, "Second answer here"))
            .await
            .unwrap();
        assert!(second.session_completed);
        assert_eq!(second.answers_recorded, 2);
    }

    #[tokio::test]
    async fn submit_rejects_unknown_session() {
        let handler = handler_with(
            Arc::new(MockSessionRepository::empty()),
            Arc::new(MockQuestionnaireStore::new()),
            Arc::new(MockAnswerCache::new()),
        );

        let err = handler
            .handle(command(SessionId::new(), 1, "anything"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::SessionNotFound);
    }

    #[tokio::test]
    async fn submit_rejects_other_users_session() {
        let session = Session::new(SessionId::new(), UserId::new("owner").unwrap());
        let session_id = *session.id();
        let handler = handler_with(
            Arc::new(MockSessionRepository::with_session(session)),
            Arc::new(MockQuestionnaireStore::new()),
            Arc::new(MockAnswerCache::new()),
        );

        let err = handler
            .handle(command(session_id, 1, "anything"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn submit_rejects_duplicate_question() {
        let session = Session::with_threshold(SessionId::new(), test_user_id(), 5);
        let session_id = *session.id();
        let handler = handler_with(
            Arc::new(MockSessionRepository::with_session(session)),
            Arc::new(MockQuestionnaireStore::new()),
            Arc::new(MockAnswerCache::new()),
        );

        handler
            .handle(command(session_id, 1, "First time"))
            .await
            .unwrap();
        let err = handler
            .handle(command(session_id, 1, "Same question again"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::DuplicateQuestion);
    }

    #[tokio::test]
    async fn submit_degrades_to_cache_when_store_fails() {
        let session = Session::with_threshold(SessionId::new(), test_user_id(), 3);
        let session_id = *session.id();
        let cache = Arc::new(MockAnswerCache::new());
        let handler = handler_with(
            Arc::new(MockSessionRepository::with_session(session)),
            Arc::new(MockQuestionnaireStore::failing()),
            cache.clone(),
        );

        let result = handler
            .handle(command(session_id, 1, "Still recorded despite the outage"))
            .await
            .unwrap();

        assert!(!result.store_outcome.is_stored());
        assert_eq!(cache.cached_answers_for(&session_id).len(), 1);
        match result.store_outcome {
            StoreOutcome::Degraded { reason } => assert!(!reason.is_empty()),
            StoreOutcome::Stored => panic!("expected degraded outcome"),
        }
    }

    #[tokio::test]
    async fn submit_fails_when_store_and_cache_both_fail() {
        let session = Session::with_threshold(SessionId::new(), test_user_id(), 3);
        let session_id = *session.id();
        let handler = handler_with(
            Arc::new(MockSessionRepository::with_session(session)),
            Arc::new(MockQuestionnaireStore::failing()),
            Arc::new(MockAnswerCache::failing()),
        );

        let err = handler
            .handle(command(session_id, 1, "Nowhere to land"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::StorageError);
    }
}
