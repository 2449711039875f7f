use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid question type: {0}")]
    InvalidQuestionType(String),

    #[error("Question generation failed: {0}")]
    GenerationFailure(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn session_not_found(session_id: impl std::fmt::Display) -> Self {
        AppError::NotFound(format!("Quiz session '{}' not found", session_id))
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::InvalidQuestionType(_) => "INVALID_QUESTION_TYPE",
            AppError::GenerationFailure(_) => "GENERATION_FAILURE",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    pub kind: &'static str,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidQuestionType(_) => StatusCode::BAD_REQUEST,
            AppError::GenerationFailure(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.status_code().as_u16(),
            kind: self.error_code(),
        })
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InternalError(format!("Session serialization error: {}", err))
    }
}

impl From<crate::services::generation_service::GenerationError> for AppError {
    fn from(err: crate::services::generation_service::GenerationError) -> Self {
        AppError::GenerationFailure(err.to_string())
    }
}

impl From<crate::services::question_parser::QuestionParseError> for AppError {
    fn from(err: crate::services::question_parser::QuestionParseError) -> Self {
        AppError::GenerationFailure(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
