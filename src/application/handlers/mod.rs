//! Command handlers, grouped by aggregate.

pub mod questionnaire;
