//! Session - the append-only questionnaire run.

mod aggregate;
mod answer;

pub use aggregate::{Session, DEFAULT_COMPLETION_THRESHOLD};
pub use answer::Answer;
