//! PostgreSQL adapters - Database implementations for persistence ports.
//!
//! - `PostgresSessionRepository` - Session aggregates, answers as JSONB
//! - `PostgresQuestionnaireStore` - durable answer and profile records

mod questionnaire_store;
mod session_repository;

pub use questionnaire_store::PostgresQuestionnaireStore;
pub use session_repository::PostgresSessionRepository;
