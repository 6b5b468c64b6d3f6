//! Application layer - Commands and Handlers.
//!
//! Each use case is a command struct plus a handler holding its port
//! dependencies behind `Arc<dyn Port>`. Handlers orchestrate the domain
//! and decide fallback policy; the domain itself stays synchronous and
//! side-effect free.

pub mod handlers;

pub use handlers::questionnaire::{
    CompleteQuestionnaireCommand, CompleteQuestionnaireHandler, CompleteQuestionnaireResult,
    GenerateReportCommand, GenerateReportHandler, GenerateReportResult, NarrativeSource,
    NextQuestionCommand, NextQuestionHandler, NextQuestionResult, QuestionSource,
    StartQuestionnaireCommand, StartQuestionnaireHandler, StartQuestionnaireResult,
    SubmitAnswerCommand, SubmitAnswerHandler, SubmitAnswerResult,
};
