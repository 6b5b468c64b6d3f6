//! CompleteQuestionnaireHandler - Command handler for aggregating a profile.
//!
//! Runs exactly one aggregation pass over the session's answers and stores
//! the resulting profile with the same degraded-to-cache policy used for
//! answers.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, ProfileId, SessionId, UserId};
use crate::domain::profile::{ProfileAggregator, PsychologicalProfile};
use crate::ports::{AnswerCache, QuestionnaireStore, SessionRepository, StoreOutcome};

/// Command to complete a session and derive its profile.
#[derive(Debug, Clone)]
pub struct CompleteQuestionnaireCommand {
    pub session_id: SessionId,
    pub user_id: UserId,
}

/// Result of a successful completion.
#[derive(Debug, Clone)]
pub struct CompleteQuestionnaireResult {
    pub profile_id: ProfileId,
    pub profile: PsychologicalProfile,
    pub store_outcome: StoreOutcome,
}

/// Handler for questionnaire completion.
pub struct CompleteQuestionnaireHandler {
    repository: Arc<dyn SessionRepository>,
    store: Arc<dyn QuestionnaireStore>,
    cache: Arc<dyn AnswerCache>,
    aggregator: ProfileAggregator,
}

impl CompleteQuestionnaireHandler {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        store: Arc<dyn QuestionnaireStore>,
        cache: Arc<dyn AnswerCache>,
        aggregator: ProfileAggregator,
    ) -> Self {
        Self {
            repository,
            store,
            cache,
            aggregator,
        }
    }

    pub async fn handle(
        &self,
        cmd: CompleteQuestionnaireCommand,
    ) -> Result<CompleteQuestionnaireResult, DomainError> {
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

        if !session.is_complete() {
            return Err(DomainError::new(
                ErrorCode::SessionIncomplete,
                format!(
                    "Session has {} of {} answers",
                    session.answer_count(),
                    session.completion_threshold()
                ),
            )
            .with_detail("answer_count", session.answer_count().to_string())
            .with_detail("threshold", session.completion_threshold().to_string()));
        }

        let profile = self.aggregator.aggregate(session.answers())?;
        let profile_id = ProfileId::new();

        let store_outcome = match self
            .store
            .store_profile(&profile_id, &cmd.user_id, &cmd.session_id, &profile)
            .await
        {
            Ok(()) => StoreOutcome::Stored,
            Err(err) => {
                tracing::warn!(
                    session_id = %cmd.session_id,
                    profile_id = %profile_id,
                    error = %err,
                    "durable profile store failed, caching locally"
                );
                self.cache
                    .cache_profile(&cmd.session_id, &profile)
                    .await
                    .map_err(|cache_err| {
                        DomainError::new(
                            ErrorCode::StorageError,
                            format!("Profile store and cache both failed: {cache_err}"),
                        )
                    })?;
                StoreOutcome::degraded(err.to_string())
            }
        };

        tracing::info!(
            session_id = %cmd.session_id,
            profile_id = %profile_id,
            archetype = %profile.archetype,
            dominant_emotion = %profile.dominant_emotion,
            "profile aggregated"
        );

        Ok(CompleteQuestionnaireResult {
            profile_id,
            profile,
            store_outcome,
        })
    }
}
