//! Shared mock ports for handler tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, ProfileId, SessionId, UserId};
use crate::domain::profile::PsychologicalProfile;
use crate::domain::session::{Answer, Session};
use crate::ports::{
    AnswerCache, GenerationError, GenerationRequest, QuestionnaireStore, SessionRepository,
    StorageError, TextGenerator,
};

pub struct MockSessionRepository {
    sessions: Mutex<HashMap<SessionId, Session>>,
}

impl MockSessionRepository {
    pub fn empty() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_session(session: Session) -> Self {
        let repository = Self::empty();
        repository
            .sessions
            .lock()
            .unwrap()
            .insert(*session.id(), session);
        repository
    }

    pub fn session(&self, id: &SessionId) -> Option<Session> {
        self.sessions.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl SessionRepository for MockSessionRepository {
    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        self.sessions
            .lock()
            .unwrap()
            .insert(*session.id(), session.clone());
        Ok(())
    }

    async fn update(&self, session: &Session) -> Result<(), DomainError> {
        let mut sessions = self.sessions.lock().unwrap();
        if !sessions.contains_key(session.id()) {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                "Session not found",
            ));
        }
        sessions.insert(*session.id(), session.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        Ok(self.sessions.lock().unwrap().get(id).cloned())
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Vec<Session>, DomainError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.user_id() == user_id)
            .cloned()
            .collect())
    }
}

pub struct MockQuestionnaireStore {
    answers: Mutex<Vec<(SessionId, Answer)>>,
    profiles: Mutex<HashMap<ProfileId, PsychologicalProfile>>,
    fail: bool,
}

impl MockQuestionnaireStore {
    pub fn new() -> Self {
        Self {
            answers: Mutex::new(Vec::new()),
            profiles: Mutex::new(HashMap::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            answers: Mutex::new(Vec::new()),
            profiles: Mutex::new(HashMap::new()),
            fail: true,
        }
    }

    pub fn stored_answers(&self) -> Vec<(SessionId, Answer)> {
        self.answers.lock().unwrap().clone()
    }

    pub fn stored_profiles(&self) -> Vec<PsychologicalProfile> {
        self.profiles.lock().unwrap().values().cloned().collect()
    }
}

#[async_trait]
impl QuestionnaireStore for MockQuestionnaireStore {
    async fn store_answer(
        &self,
        _user_id: &UserId,
        session_id: &SessionId,
        answer: &Answer,
    ) -> Result<(), StorageError> {
        if self.fail {
            return Err(StorageError::Database("simulated outage".to_string()));
        }
        self.answers
            .lock()
            .unwrap()
            .push((*session_id, answer.clone()));
        Ok(())
    }

    async fn store_profile(
        &self,
        profile_id: &ProfileId,
        _user_id: &UserId,
        _session_id: &SessionId,
        profile: &PsychologicalProfile,
    ) -> Result<(), StorageError> {
        if self.fail {
            return Err(StorageError::Database("simulated outage".to_string()));
        }
        self.profiles
            .lock()
            .unwrap()
            .insert(*profile_id, profile.clone());
        Ok(())
    }

    async fn load_profile(
        &self,
        profile_id: &ProfileId,
    ) -> Result<Option<PsychologicalProfile>, StorageError> {
        if self.fail {
            return Err(StorageError::Database("simulated outage".to_string()));
        }
        Ok(self.profiles.lock().unwrap().get(profile_id).cloned())
    }
}

pub struct MockAnswerCache {
    answers: Mutex<HashMap<SessionId, Vec<Answer>>>,
    profiles: Mutex<HashMap<SessionId, PsychologicalProfile>>,
    fail: bool,
}

impl MockAnswerCache {
    pub fn new() -> Self {
        Self {
            answers: Mutex::new(HashMap::new()),
            profiles: Mutex::new(HashMap::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            answers: Mutex::new(HashMap::new()),
            profiles: Mutex::new(HashMap::new()),
            fail: true,
        }
    }

    pub fn cached_answers_for(&self, session_id: &SessionId) -> Vec<Answer> {
        self.answers
            .lock()
            .unwrap()
            .get(session_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn cached_profile_for(&self, session_id: &SessionId) -> Option<PsychologicalProfile> {
        self.profiles.lock().unwrap().get(session_id).cloned()
    }
}

#[async_trait]
impl AnswerCache for MockAnswerCache {
    async fn cache_answer(
        &self,
        session_id: &SessionId,
        answer: &Answer,
    ) -> Result<(), StorageError> {
        if self.fail {
            return Err(StorageError::Io("disk full".to_string()));
        }
        self.answers
            .lock()
            .unwrap()
            .entry(*session_id)
            .or_default()
            .push(answer.clone());
        Ok(())
    }

    async fn cache_profile(
        &self,
        session_id: &SessionId,
        profile: &PsychologicalProfile,
    ) -> Result<(), StorageError> {
        if self.fail {
            return Err(StorageError::Io("disk full".to_string()));
        }
        self.profiles
            .lock()
            .unwrap()
            .insert(*session_id, profile.clone());
        Ok(())
    }

    async fn cached_answers(&self, session_id: &SessionId) -> Result<Vec<Answer>, StorageError> {
        if self.fail {
            return Err(StorageError::Io("disk full".to_string()));
        }
        Ok(self.cached_answers_for(session_id))
    }
}

pub struct MockTextGenerator {
    response: Option<String>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl MockTextGenerator {
    pub fn replying(response: impl Into<String>) -> Self {
        Self {
            response: Some(response.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            response: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        self.requests.lock().unwrap().push(request);
        match &self.response {
            Some(text) => Ok(text.clone()),
            None => Err(GenerationError::unavailable("simulated outage")),
        }
    }
}
