//! Foundation - shared value objects and error types for the domain layer.

mod errors;
mod ids;
mod score;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ProfileId, QuestionId, SessionId, UserId};
pub use score::Score;
pub use timestamp::Timestamp;
