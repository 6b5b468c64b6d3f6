//! HTTP routes for questionnaire endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    complete_questionnaire, generate_report, next_question, start_questionnaire, submit_answer,
    QuestionnaireHandlers,
};

/// Creates the questionnaire router with all endpoints.
pub fn questionnaire_routes(handlers: QuestionnaireHandlers) -> Router {
    Router::new()
        .route("/", post(start_questionnaire))
        .route("/:id/answers", post(submit_answer))
        .route("/:id/next", get(next_question))
        .route("/:id/complete", post(complete_questionnaire))
        .route("/:id/report", post(generate_report))
        .with_state(handlers)
}
