//! HTTP adapter for questionnaire endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CompleteQuestionnaireRequest, CompleteQuestionnaireResponse, ErrorResponse,
    GenerateReportRequest, NextQuestionQuery, NextQuestionResponse, ReportResponse,
    StartQuestionnaireRequest, StartQuestionnaireResponse, SubmitAnswerRequest,
    SubmitAnswerResponse,
};
pub use handlers::QuestionnaireHandlers;
pub use routes::questionnaire_routes;
