//! HTTP handlers for questionnaire endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::questionnaire::{
    CompleteQuestionnaireCommand, CompleteQuestionnaireHandler, GenerateReportCommand,
    GenerateReportHandler, NextQuestionCommand, NextQuestionHandler, StartQuestionnaireCommand,
    StartQuestionnaireHandler, SubmitAnswerCommand, SubmitAnswerHandler,
};
use crate::domain::foundation::{DomainError, ErrorCode, ProfileId, QuestionId, SessionId, UserId};

use super::dto::{
    degraded_fields, narrative_source_str, question_source_str, CompleteQuestionnaireRequest,
    CompleteQuestionnaireResponse, ErrorResponse, GenerateReportRequest, NextQuestionQuery,
    NextQuestionResponse, ReportResponse, StartQuestionnaireRequest, StartQuestionnaireResponse,
    SubmitAnswerRequest, SubmitAnswerResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct QuestionnaireHandlers {
    start_handler: Arc<StartQuestionnaireHandler>,
    submit_handler: Arc<SubmitAnswerHandler>,
    next_handler: Arc<NextQuestionHandler>,
    complete_handler: Arc<CompleteQuestionnaireHandler>,
    report_handler: Arc<GenerateReportHandler>,
}

impl QuestionnaireHandlers {
    pub fn new(
        start_handler: Arc<StartQuestionnaireHandler>,
        submit_handler: Arc<SubmitAnswerHandler>,
        next_handler: Arc<NextQuestionHandler>,
        complete_handler: Arc<CompleteQuestionnaireHandler>,
        report_handler: Arc<GenerateReportHandler>,
    ) -> Self {
        Self {
            start_handler,
            submit_handler,
            next_handler,
            complete_handler,
            report_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/questionnaire - Start a new session
pub async fn start_questionnaire(
    State(handlers): State<QuestionnaireHandlers>,
    Json(req): Json<StartQuestionnaireRequest>,
) -> Response {
    let user_id = match UserId::new(req.user_id) {
        Ok(id) => id,
        Err(e) => return bad_request(e.to_string()),
    };

    let cmd = StartQuestionnaireCommand {
        user_id,
        completion_threshold: req.completion_threshold,
    };

    match handlers.start_handler.handle(cmd).await {
        Ok(result) => {
            let response = StartQuestionnaireResponse {
                session_id: result.session.id().to_string(),
                question_id: result.session.next_question_id().value(),
                question_text: result.first_question,
                completion_threshold: result.session.completion_threshold(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_domain_error(e),
    }
}

/// POST /api/questionnaire/:id/answers - Submit an answer
pub async fn submit_answer(
    State(handlers): State<QuestionnaireHandlers>,
    Path(session_id): Path<String>,
    Json(req): Json<SubmitAnswerRequest>,
) -> Response {
    let session_id = match session_id.parse::<SessionId>() {
        Ok(id) => id,
        Err(_) => return bad_request("Invalid session ID"),
    };
    let user_id = match UserId::new(req.user_id) {
        Ok(id) => id,
        Err(e) => return bad_request(e.to_string()),
    };

    let cmd = SubmitAnswerCommand {
        session_id,
        user_id,
        question_id: QuestionId::new(req.question_id),
        question_text: req.question_text,
        answer_text: req.answer_text,
        response_time_seconds: req.response_time_seconds,
    };

    match handlers.submit_handler.handle(cmd).await {
        Ok(result) => {
            let (degraded, degraded_reason) = degraded_fields(&result.store_outcome);
            let response = SubmitAnswerResponse {
                answer: (&result.answer).into(),
                session_completed: result.session_completed,
                answers_recorded: result.answers_recorded,
                degraded,
                degraded_reason,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_domain_error(e),
    }
}

/// GET /api/questionnaire/:id/next - Generate the next question
pub async fn next_question(
    State(handlers): State<QuestionnaireHandlers>,
    Path(session_id): Path<String>,
    Query(query): Query<NextQuestionQuery>,
) -> Response {
    let session_id = match session_id.parse::<SessionId>() {
        Ok(id) => id,
        Err(_) => return bad_request("Invalid session ID"),
    };
    let user_id = match UserId::new(query.user_id) {
        Ok(id) => id,
        Err(e) => return bad_request(e.to_string()),
    };

    let cmd = NextQuestionCommand {
        session_id,
        user_id,
    };

    match handlers.next_handler.handle(cmd).await {
        Ok(result) => {
            let response = NextQuestionResponse {
                question_id: result.question_id.value(),
                question_text: result.question_text,
                source: question_source_str(result.source).to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_domain_error(e),
    }
}

/// POST /api/questionnaire/:id/complete - Aggregate the profile
pub async fn complete_questionnaire(
    State(handlers): State<QuestionnaireHandlers>,
    Path(session_id): Path<String>,
    Json(req): Json<CompleteQuestionnaireRequest>,
) -> Response {
    let session_id = match session_id.parse::<SessionId>() {
        Ok(id) => id,
        Err(_) => return bad_request("Invalid session ID"),
    };
    let user_id = match UserId::new(req.user_id) {
        Ok(id) => id,
        Err(e) => return bad_request(e.to_string()),
    };

    let cmd = CompleteQuestionnaireCommand {
        session_id,
        user_id,
    };

    match handlers.complete_handler.handle(cmd).await {
        Ok(result) => {
            let (degraded, degraded_reason) = degraded_fields(&result.store_outcome);
            let response = CompleteQuestionnaireResponse {
                profile_id: result.profile_id.to_string(),
                profile: (&result.profile).into(),
                degraded,
                degraded_reason,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_domain_error(e),
    }
}

/// POST /api/questionnaire/:id/report - Generate the narrative report
pub async fn generate_report(
    State(handlers): State<QuestionnaireHandlers>,
    Path(session_id): Path<String>,
    Json(req): Json<GenerateReportRequest>,
) -> Response {
    let session_id = match session_id.parse::<SessionId>() {
        Ok(id) => id,
        Err(_) => return bad_request("Invalid session ID"),
    };
    let profile_id = match req.profile_id.parse::<ProfileId>() {
        Ok(id) => id,
        Err(_) => return bad_request("Invalid profile ID"),
    };
    let user_id = match UserId::new(req.user_id.clone()) {
        Ok(id) => id,
        Err(e) => return bad_request(e.to_string()),
    };

    let cmd = GenerateReportCommand {
        profile_id,
        session_id,
        user_id,
        astrology: req.astrology(),
    };

    match handlers.report_handler.handle(cmd).await {
        Ok(result) => {
            let response = ReportResponse {
                profile: (&result.report.profile).into(),
                sun_sign: result.report.astrology.sun_sign,
                moon_sign: result.report.astrology.moon_sign,
                rising_sign: result.report.astrology.rising_sign,
                narrative: result.report.narrative,
                source: narrative_source_str(result.source).to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_domain_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request(message)),
    )
        .into_response()
}

fn handle_domain_error(error: DomainError) -> Response {
    let status = match error.code {
        ErrorCode::SessionNotFound | ErrorCode::ProfileNotFound => StatusCode::NOT_FOUND,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::ValidationFailed
        | ErrorCode::SessionComplete
        | ErrorCode::SessionIncomplete
        | ErrorCode::EmptySession
        | ErrorCode::DuplicateQuestion => StatusCode::BAD_REQUEST,
        ErrorCode::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let details = if error.details.is_empty() {
        None
    } else {
        serde_json::to_value(&error.details).ok()
    };

    let mut body = ErrorResponse::new(error.code.to_string(), error.message);
    body.details = details;

    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_not_found_maps_to_404() {
        let error = DomainError::new(ErrorCode::SessionNotFound, "Session not found");
        let response = handle_domain_error(error);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn forbidden_maps_to_403() {
        let error = DomainError::new(ErrorCode::Forbidden, "Permission denied");
        let response = handle_domain_error(error);
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn duplicate_question_maps_to_400() {
        let error = DomainError::new(ErrorCode::DuplicateQuestion, "Already answered");
        let response = handle_domain_error(error);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn storage_error_maps_to_500() {
        let error = DomainError::new(ErrorCode::StorageError, "Everything is down");
        let response = handle_domain_error(error);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
