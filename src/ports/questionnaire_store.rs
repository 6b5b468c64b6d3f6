//! Questionnaire store port - durable storage for answers and profiles.
//!
//! The store is an external collaborator that may fail transiently. The
//! degraded path is explicit: `StoreOutcome` tells the orchestrator whether
//! the record landed in durable storage or in the local fallback cache, so
//! the decision to continue is made at the call site, never buried here.

use async_trait::async_trait;

use crate::domain::foundation::{ProfileId, SessionId, UserId};
use crate::domain::profile::PsychologicalProfile;
use crate::domain::session::Answer;

/// Where a record ended up after a store attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOutcome {
    /// The record reached durable storage.
    Stored,
    /// Durable storage failed; the record was kept in the local cache.
    Degraded {
        /// Why the durable write failed.
        reason: String,
    },
}

impl StoreOutcome {
    /// Creates a degraded outcome.
    pub fn degraded(reason: impl Into<String>) -> Self {
        Self::Degraded {
            reason: reason.into(),
        }
    }

    /// Whether the record reached durable storage.
    pub fn is_stored(&self) -> bool {
        matches!(self, StoreOutcome::Stored)
    }
}

/// Storage errors for the durable store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(String),

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("record not found: {0}")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(String),
}

/// Port for durable answer and profile storage.
#[async_trait]
pub trait QuestionnaireStore: Send + Sync {
    /// Stores one answer, keyed by user and session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on failure; the orchestrator degrades to the
    /// local cache rather than losing the answer.
    async fn store_answer(
        &self,
        user_id: &UserId,
        session_id: &SessionId,
        answer: &Answer,
    ) -> Result<(), StorageError>;

    /// Stores a completed profile.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on failure; same degraded policy applies.
    async fn store_profile(
        &self,
        profile_id: &ProfileId,
        user_id: &UserId,
        session_id: &SessionId,
        profile: &PsychologicalProfile,
    ) -> Result<(), StorageError>;

    /// Loads a stored profile by ID.
    async fn load_profile(
        &self,
        profile_id: &ProfileId,
    ) -> Result<Option<PsychologicalProfile>, StorageError>;
}

/// Port for the local fallback cache used when the store degrades.
///
/// The cache must accept writes even when the durable store is down; it is
/// the last line of defense against losing a user's in-progress answers.
#[async_trait]
pub trait AnswerCache: Send + Sync {
    /// Caches one answer locally.
    async fn cache_answer(
        &self,
        session_id: &SessionId,
        answer: &Answer,
    ) -> Result<(), StorageError>;

    /// Caches a profile locally.
    async fn cache_profile(
        &self,
        session_id: &SessionId,
        profile: &PsychologicalProfile,
    ) -> Result<(), StorageError>;

    /// Returns all cached answers for a session, in cache order.
    async fn cached_answers(&self, session_id: &SessionId) -> Result<Vec<Answer>, StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_outcome_reports_stored() {
        assert!(StoreOutcome::Stored.is_stored());
        assert!(!StoreOutcome::degraded("db down").is_stored());
    }

    #[test]
    fn degraded_outcome_carries_reason() {
        match StoreOutcome::degraded("connection refused") {
            StoreOutcome::Degraded { reason } => assert_eq!(reason, "connection refused"),
            StoreOutcome::Stored => panic!("expected degraded"),
        }
    }

    #[test]
    fn store_ports_are_object_safe() {
        fn _store(_s: &dyn QuestionnaireStore) {}
        fn _cache(_c: &dyn AnswerCache) {}
    }
}
