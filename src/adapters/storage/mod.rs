//! Storage adapters - in-memory and file-backed implementations.

mod file_cache;
mod in_memory;

pub use file_cache::FileAnswerCache;
pub use in_memory::{InMemoryQuestionnaireStore, InMemorySessionRepository};
