//! In-memory adapters for tests and single-process development runs.
//!
//! Everything lives behind a `Mutex<HashMap>`; nothing survives a restart.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::foundation::{DomainError, ErrorCode, ProfileId, SessionId, UserId};
use crate::domain::profile::PsychologicalProfile;
use crate::domain::session::{Answer, Session};
use crate::ports::{QuestionnaireStore, SessionRepository, StorageError};

/// In-memory session repository.
#[derive(Debug, Default)]
pub struct InMemorySessionRepository {
    sessions: Mutex<HashMap<SessionId, Session>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        self.sessions
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "Lock poisoned"))?
            .insert(*session.id(), session.clone());
        Ok(())
    }

    async fn update(&self, session: &Session) -> Result<(), DomainError> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "Lock poisoned"))?;
        if !sessions.contains_key(session.id()) {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session {} not found", session.id()),
            ));
        }
        sessions.insert(*session.id(), session.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        Ok(self
            .sessions
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "Lock poisoned"))?
            .get(id)
            .cloned())
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Vec<Session>, DomainError> {
        let mut sessions: Vec<Session> = self
            .sessions
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "Lock poisoned"))?
            .values()
            .filter(|s| s.user_id() == user_id)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.created_at().cmp(a.created_at()));
        Ok(sessions)
    }
}

/// In-memory questionnaire store.
#[derive(Debug, Default)]
pub struct InMemoryQuestionnaireStore {
    answers: Mutex<Vec<StoredAnswer>>,
    profiles: Mutex<HashMap<ProfileId, PsychologicalProfile>>,
}

#[derive(Debug, Clone)]
struct StoredAnswer {
    user_id: UserId,
    session_id: SessionId,
    answer: Answer,
}

impl InMemoryQuestionnaireStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns stored answers for a session, in store order.
    pub fn answers_for_session(&self, session_id: &SessionId) -> Vec<Answer> {
        self.answers
            .lock()
            .map(|answers| {
                answers
                    .iter()
                    .filter(|stored| &stored.session_id == session_id)
                    .map(|stored| stored.answer.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns stored answers for a user, in store order.
    pub fn answers_for_user(&self, user_id: &UserId) -> Vec<Answer> {
        self.answers
            .lock()
            .map(|answers| {
                answers
                    .iter()
                    .filter(|stored| &stored.user_id == user_id)
                    .map(|stored| stored.answer.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl QuestionnaireStore for InMemoryQuestionnaireStore {
    async fn store_answer(
        &self,
        user_id: &UserId,
        session_id: &SessionId,
        answer: &Answer,
    ) -> Result<(), StorageError> {
        self.answers
            .lock()
            .map_err(|_| StorageError::Database("Lock poisoned".to_string()))?
            .push(StoredAnswer {
                user_id: user_id.clone(),
                session_id: *session_id,
                answer: answer.clone(),
            });
        Ok(())
    }

    async fn store_profile(
        &self,
        profile_id: &ProfileId,
        _user_id: &UserId,
        _session_id: &SessionId,
        profile: &PsychologicalProfile,
    ) -> Result<(), StorageError> {
        self.profiles
            .lock()
            .map_err(|_| StorageError::Database("Lock poisoned".to_string()))?
            .insert(*profile_id, profile.clone());
        Ok(())
    }

    async fn load_profile(
        &self,
        profile_id: &ProfileId,
    ) -> Result<Option<PsychologicalProfile>, StorageError> {
        Ok(self
            .profiles
            .lock()
            .map_err(|_| StorageError::Database("Lock poisoned".to_string()))?
            .get(profile_id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::ResponseAnalyzer;
    use crate::domain::foundation::QuestionId;

    fn test_answer(question_id: u32) -> Answer {
        let analyzer = ResponseAnalyzer::with_defaults();
        Answer::new(
            QuestionId::new(question_id),
            "A question",
            "A reply",
            5,
            analyzer.analyze("A reply"),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn repository_round_trips_sessions() {
        let repository = InMemorySessionRepository::new();
        let user_id = UserId::new("u1").unwrap();
        let session = Session::new(SessionId::new(), user_id.clone());

        repository.save(&session).await.unwrap();

        let found = repository.find_by_id(session.id()).await.unwrap().unwrap();
        assert_eq!(found.id(), session.id());

        let listed = repository.find_by_user_id(&user_id).await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn repository_update_requires_existing_session() {
        let repository = InMemorySessionRepository::new();
        let session = Session::new(SessionId::new(), UserId::new("u1").unwrap());

        let err = repository.update(&session).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionNotFound);
    }

    #[tokio::test]
    async fn store_keeps_answers_by_session() {
        let store = InMemoryQuestionnaireStore::new();
        let user_id = UserId::new("u1").unwrap();
        let session_id = SessionId::new();

        store
            .store_answer(&user_id, &session_id, &test_answer(1))
            .await
            .unwrap();
        store
            .store_answer(&user_id, &session_id, &test_answer(2))
            .await
            .unwrap();

        assert_eq!(store.answers_for_session(&session_id).len(), 2);
        assert!(store.answers_for_session(&SessionId::new()).is_empty());
    }

    #[tokio::test]
    async fn store_round_trips_profiles() {
        let store = InMemoryQuestionnaireStore::new();
        let profile_id = ProfileId::new();

        assert!(store.load_profile(&profile_id).await.unwrap().is_none());
    }
}
