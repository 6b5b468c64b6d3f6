//! PostgreSQL implementation of SessionRepository.
//!
//! Persists Session aggregates to PostgreSQL. Answers ride along in a
//! JSONB column; they are append-only value objects with no identity of
//! their own, so there is nothing to gain from a separate table.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, SessionId, Timestamp, UserId};
use crate::domain::session::{Answer, Session};
use crate::ports::SessionRepository;

/// PostgreSQL implementation of SessionRepository.
#[derive(Clone)]
pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    /// Creates a new PostgresSessionRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        let answers = answers_to_json(session.answers())?;

        sqlx::query(
            r#"
            INSERT INTO questionnaire_sessions (
                id, user_id, completion_threshold, answers, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.user_id().as_str())
        .bind(session.completion_threshold() as i32)
        .bind(answers)
        .bind(session.created_at().as_datetime())
        .bind(session.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert session: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, session: &Session) -> Result<(), DomainError> {
        let answers = answers_to_json(session.answers())?;

        let result = sqlx::query(
            r#"
            UPDATE questionnaire_sessions SET
                answers = $2,
                updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(answers)
        .bind(session.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update session: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", session.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, completion_threshold, answers, created_at, updated_at
            FROM questionnaire_sessions
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch session: {}", e),
            )
        })?;

        match row {
            Some(row) => Ok(Some(row_to_session(row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Vec<Session>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, completion_threshold, answers, created_at, updated_at
            FROM questionnaire_sessions
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch sessions by user: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_session).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn answers_to_json(answers: &[Answer]) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(answers).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to serialize answers: {}", e),
        )
    })
}

fn row_to_session(row: sqlx::postgres::PgRow) -> Result<Session, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to read session id: {}", e),
        )
    })?;

    let user_id: String = row.try_get("user_id").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to read user_id: {}", e),
        )
    })?;

    let completion_threshold: i32 = row.try_get("completion_threshold").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to read completion_threshold: {}", e),
        )
    })?;

    let answers_json: serde_json::Value = row.try_get("answers").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to read answers: {}", e),
        )
    })?;

    let answers: Vec<Answer> = serde_json::from_value(answers_json).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to deserialize answers: {}", e),
        )
    })?;

    let created_at: chrono::DateTime<chrono::Utc> = row.try_get("created_at").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to read created_at: {}", e),
        )
    })?;

    let updated_at: chrono::DateTime<chrono::Utc> = row.try_get("updated_at").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to read updated_at: {}", e),
        )
    })?;

    let user_id = UserId::new(user_id)?;

    Ok(Session::reconstitute(
        SessionId::from_uuid(id),
        user_id,
        completion_threshold as usize,
        answers,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
