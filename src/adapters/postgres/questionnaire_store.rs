//! PostgreSQL implementation of QuestionnaireStore.
//!
//! Answers and profiles land in their own tables as JSONB payloads with
//! the identifying columns lifted out for querying. Failures map to
//! `StorageError::Database` so the orchestrator can degrade to the local
//! cache.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{ProfileId, SessionId, UserId};
use crate::domain::profile::PsychologicalProfile;
use crate::domain::session::Answer;
use crate::ports::{QuestionnaireStore, StorageError};

/// PostgreSQL implementation of QuestionnaireStore.
#[derive(Clone)]
pub struct PostgresQuestionnaireStore {
    pool: PgPool,
}

impl PostgresQuestionnaireStore {
    /// Creates a new PostgresQuestionnaireStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionnaireStore for PostgresQuestionnaireStore {
    async fn store_answer(
        &self,
        user_id: &UserId,
        session_id: &SessionId,
        answer: &Answer,
    ) -> Result<(), StorageError> {
        let payload = serde_json::to_value(answer)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO questionnaire_answers (
                user_id, session_id, question_id, payload, created_at
            ) VALUES ($1, $2, $3, $4, NOW())
            "#,
        )
        .bind(user_id.as_str())
        .bind(session_id.as_uuid())
        .bind(answer.question_id().value() as i32)
        .bind(payload)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Database(format!("Failed to insert answer: {}", e)))?;

        Ok(())
    }

    async fn store_profile(
        &self,
        profile_id: &ProfileId,
        user_id: &UserId,
        session_id: &SessionId,
        profile: &PsychologicalProfile,
    ) -> Result<(), StorageError> {
        let payload = serde_json::to_value(profile)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO psychological_profiles (
                id, user_id, session_id, payload, created_at
            ) VALUES ($1, $2, $3, $4, NOW())
            "#,
        )
        .bind(profile_id.as_uuid())
        .bind(user_id.as_str())
        .bind(session_id.as_uuid())
        .bind(payload)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Database(format!("Failed to insert profile: {}", e)))?;

        Ok(())
    }

    async fn load_profile(
        &self,
        profile_id: &ProfileId,
    ) -> Result<Option<PsychologicalProfile>, StorageError> {
        let row = sqlx::query(
            r#"
            SELECT payload FROM psychological_profiles WHERE id = $1
            "#,
        )
        .bind(profile_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Database(format!("Failed to fetch profile: {}", e)))?;

        match row {
            Some(row) => {
                let payload: serde_json::Value = row
                    .try_get("payload")
                    .map_err(|e| StorageError::Database(format!("Failed to read payload: {}", e)))?;
                let profile = serde_json::from_value(payload)
                    .map_err(|e| StorageError::Serialization(e.to_string()))?;
                Ok(Some(profile))
            }
            None => Ok(None),
        }
    }
}
