//! StartQuestionnaireHandler - Command handler for opening a new session.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, SessionId, UserId};
use crate::domain::session::Session;
use crate::ports::SessionRepository;

use super::questions::OPENING_QUESTION;

/// Command to start a new questionnaire session.
#[derive(Debug, Clone)]
pub struct StartQuestionnaireCommand {
    pub user_id: UserId,
    /// Override for the completion threshold; `None` uses the default.
    pub completion_threshold: Option<usize>,
}

/// Result of successfully starting a questionnaire.
#[derive(Debug, Clone)]
pub struct StartQuestionnaireResult {
    pub session: Session,
    pub first_question: String,
}

/// Handler for starting questionnaire sessions.
pub struct StartQuestionnaireHandler {
    repository: Arc<dyn SessionRepository>,
    default_threshold: usize,
}

impl StartQuestionnaireHandler {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self {
            repository,
            default_threshold: crate::domain::session::DEFAULT_COMPLETION_THRESHOLD,
        }
    }

    /// Overrides the threshold used when the command does not carry one.
    pub fn with_default_threshold(mut self, threshold: usize) -> Self {
        self.default_threshold = threshold;
        self
    }

    pub async fn handle(
        &self,
        cmd: StartQuestionnaireCommand,
    ) -> Result<StartQuestionnaireResult, DomainError> {
        let session_id = SessionId::new();
        let threshold = cmd.completion_threshold.unwrap_or(self.default_threshold);
        let session = Session::with_threshold(session_id, cmd.user_id, threshold);

        self.repository.save(&session).await?;

        tracing::info!(
            session_id = %session.id(),
            user_id = %session.user_id(),
            threshold = session.completion_threshold(),
            "questionnaire session started"
        );

        Ok(StartQuestionnaireResult {
            session,
            first_question: OPENING_QUESTION.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockSessionRepository {
        saved: Mutex<Vec<Session>>,
        fail_save: bool,
    }

    impl MockSessionRepository {
        fn new() -> Self {
            Self {
                saved: Mutex::new(Vec::new()),
                fail_save: false,
            }
        }

        fn failing() -> Self {
            Self {
                saved: Mutex::new(Vec::new()),
                fail_save: true,
            }
        }

        fn saved(&self) -> Vec<Session> {
            self.saved.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SessionRepository for MockSessionRepository {
        async fn save(&self, session: &Session) -> Result<(), DomainError> {
            if self.fail_save {
                return Err(DomainError::new(
                    ErrorCode::DatabaseError,
                    "Simulated save failure",
                ));
            }
            self.saved.lock().unwrap().push(session.clone());
            Ok(())
        }

        async fn update(&self, _session: &Session) -> Result<(), DomainError> {
            Ok(())
        }

        async fn find_by_id(&self, _id: &SessionId) -> Result<Option<Session>, DomainError> {
            Ok(None)
        }

        async fn find_by_user_id(&self, _user_id: &UserId) -> Result<Vec<Session>, DomainError> {
            Ok(vec![])
        }
    }

    fn test_user_id() -> UserId {
        UserId::new("user-123").unwrap()
    }

    #[tokio::test]
    async fn start_persists_session_and_returns_opening_question() {
        let repository = Arc::new(MockSessionRepository::new());
        let handler = StartQuestionnaireHandler::new(repository.clone());

        let result = handler
            .handle(StartQuestionnaireCommand {
                user_id: test_user_id(),
                completion_threshold: None,
            })
            .await
            .unwrap();

        assert_eq!(result.first_question, OPENING_QUESTION);
        assert_eq!(result.session.answer_count(), 0);
        assert_eq!(
            result.session.completion_threshold(),
            crate::domain::session::DEFAULT_COMPLETION_THRESHOLD
        );
        assert!(!result.session.is_complete());

        let saved = repository.saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].id(), result.session.id());
    }

    #[tokio::test]
    async fn start_honors_threshold_override() {
        let repository = Arc::new(MockSessionRepository::new());
        let handler = StartQuestionnaireHandler::new(repository);

        let result = handler
            .handle(StartQuestionnaireCommand {
                user_id: test_user_id(),
                completion_threshold: Some(3),
            })
            .await
            .unwrap();

        assert_eq!(result.session.completion_threshold(), 3);
    }

    #[tokio::test]
    async fn configured_default_applies_without_override() {
        let repository = Arc::new(MockSessionRepository::new());
        let handler = StartQuestionnaireHandler::new(repository).with_default_threshold(5);

        let result = handler
            .handle(StartQuestionnaireCommand {
                user_id: test_user_id(),
                completion_threshold: None,
            })
            .await
            .unwrap();

        assert_eq!(result.session.completion_threshold(), 5);
    }

    #[tokio::test]
    async fn start_propagates_repository_failure() {
        let repository = Arc::new(MockSessionRepository::failing());
        let handler = StartQuestionnaireHandler::new(repository);

        let err = handler
            .handle(StartQuestionnaireCommand {
                user_id: test_user_id(),
                completion_threshold: None,
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
