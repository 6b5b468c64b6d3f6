//! Session aggregate entity.
//!
//! A session is the ordered, append-only sequence of answers collected
//! during one questionnaire run. It is created when the questionnaire
//! begins, becomes complete once it reaches its configured answer
//! threshold, and is consumed exactly once by the profile aggregator.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, ErrorCode, QuestionId, SessionId, Timestamp, UserId,
};

use super::Answer;

/// Default number of answers that completes a session.
pub const DEFAULT_COMPLETION_THRESHOLD: usize = 9;

/// Session aggregate - one questionnaire run for one user.
///
/// # Invariants
///
/// - `answers` grows by append only, in submission order
/// - `question_id` values are unique within the session
/// - No answers are accepted once the completion threshold is reached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier for this session.
    id: SessionId,

    /// User who owns this session.
    user_id: UserId,

    /// Number of answers at which the session is complete.
    completion_threshold: usize,

    /// Collected answers, in submission order.
    answers: Vec<Answer>,

    /// When the session was created.
    created_at: Timestamp,

    /// When the session was last updated.
    updated_at: Timestamp,
}

impl Session {
    /// Create a new empty session with the default threshold.
    pub fn new(id: SessionId, user_id: UserId) -> Self {
        Self::with_threshold(id, user_id, DEFAULT_COMPLETION_THRESHOLD)
    }

    /// Create a new empty session with a custom completion threshold.
    pub fn with_threshold(id: SessionId, user_id: UserId, completion_threshold: usize) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            user_id,
            completion_threshold: completion_threshold.max(1),
            answers: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute a session from persistence (no validation).
    pub fn reconstitute(
        id: SessionId,
        user_id: UserId,
        completion_threshold: usize,
        answers: Vec<Answer>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            completion_threshold,
            answers,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the session ID.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns the owner's user ID.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the collected answers in submission order.
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    /// Returns the number of answers collected so far.
    pub fn answer_count(&self) -> usize {
        self.answers.len()
    }

    /// Returns the completion threshold.
    pub fn completion_threshold(&self) -> usize {
        self.completion_threshold
    }

    /// Checks whether the session has reached its threshold.
    pub fn is_complete(&self) -> bool {
        self.answers.len() >= self.completion_threshold
    }

    /// Returns the next question position.
    pub fn next_question_id(&self) -> QuestionId {
        QuestionId::new(self.answers.len() as u32 + 1)
    }

    /// Returns when the session was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns when the session was last updated.
    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authorization
    // ─────────────────────────────────────────────────────────────────────────

    /// Checks if the given user owns this session.
    pub fn is_owner(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    /// Validates that the user can access this session.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if user is not the owner
    pub fn authorize(&self, user_id: &UserId) -> Result<(), DomainError> {
        if self.is_owner(user_id) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "User is not authorized to access this session",
            ))
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Append an answer to the session.
    ///
    /// Returns `true` when this answer completed the session.
    ///
    /// # Errors
    ///
    /// - `SessionComplete` if the threshold was already reached
    /// - `DuplicateQuestion` if the question position was already answered
    pub fn append_answer(&mut self, answer: Answer) -> Result<bool, DomainError> {
        if self.is_complete() {
            return Err(DomainError::new(
                ErrorCode::SessionComplete,
                "Session has already reached its completion threshold",
            ));
        }

        if self
            .answers
            .iter()
            .any(|a| a.question_id() == answer.question_id())
        {
            return Err(DomainError::new(
                ErrorCode::DuplicateQuestion,
                format!("Question {} was already answered", answer.question_id()),
            )
            .with_detail("question_id", answer.question_id().to_string()));
        }

        self.answers.push(answer);
        self.updated_at = Timestamp::now();
        Ok(self.is_complete())
    }
}
