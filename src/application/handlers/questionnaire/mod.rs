//! Questionnaire command handlers.

mod complete_questionnaire;
mod generate_report;
mod next_question;
mod questions;
mod start_questionnaire;
mod submit_answer;

#[cfg(test)]
pub(crate) mod testing;

pub use complete_questionnaire::{
    CompleteQuestionnaireCommand, CompleteQuestionnaireHandler, CompleteQuestionnaireResult,
};
pub use generate_report::{
    GenerateReportCommand, GenerateReportHandler, GenerateReportResult, NarrativeSource,
};
pub use next_question::{
    NextQuestionCommand, NextQuestionHandler, NextQuestionResult, QuestionSource,
};
pub use questions::{fallback_question, phase_for_progress, FALLBACK_QUESTIONS, OPENING_QUESTION};
pub use start_questionnaire::{
    StartQuestionnaireCommand, StartQuestionnaireHandler, StartQuestionnaireResult,
};
pub use submit_answer::{SubmitAnswerCommand, SubmitAnswerHandler, SubmitAnswerResult};
