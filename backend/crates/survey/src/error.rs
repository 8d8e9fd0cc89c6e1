//! Survey Error Types
//!
//! This module provides survey-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::validation::FieldError;
use crate::presentation::dto::ErrorResponse;

/// Survey-specific result type alias
pub type SurveyResult<T> = Result<T, SurveyError>;

/// Caller-facing detail for [`SurveyError::InvalidJson`]
pub const INVALID_JSON_DETAIL: &str = "Body must be application/json";

/// Survey-specific error variants
#[derive(Debug, Error)]
pub enum SurveyError {
    /// Body is absent, not JSON, JSON `null`, or sent with a non-JSON content type
    #[error("Request body is not valid JSON")]
    InvalidJson,

    /// Payload parsed but failed schema validation
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// Survey log could not be written
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Record could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SurveyError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            SurveyError::InvalidJson => ErrorKind::BadRequest,
            SurveyError::Validation(_) => ErrorKind::UnprocessableEntity,
            SurveyError::Storage(_) | SurveyError::Serialization(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Stable code reported in the `error` field of 4xx bodies
    pub fn code(&self) -> &'static str {
        match self {
            SurveyError::InvalidJson => "invalid_json",
            SurveyError::Validation(_) => "validation_error",
            SurveyError::Storage(_) => "storage_error",
            SurveyError::Serialization(_) => "serialization_error",
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            SurveyError::Storage(e) => {
                tracing::error!(error = %e, "Survey log append failed");
            }
            SurveyError::Serialization(e) => {
                tracing::error!(error = %e, "Survey record serialization failed");
            }
            SurveyError::Validation(errors) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                tracing::debug!(?fields, "Survey submission rejected");
            }
            SurveyError::InvalidJson => {
                tracing::debug!("Survey submission body is not JSON");
            }
        }
    }
}

impl IntoResponse for SurveyError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status_code();
        let code = self.code();
        match self {
            SurveyError::InvalidJson => {
                (status, Json(ErrorResponse::new(code, INVALID_JSON_DETAIL))).into_response()
            }
            SurveyError::Validation(errors) => {
                (status, Json(ErrorResponse::new(code, errors))).into_response()
            }
            // The source stays in the logs, not in the body
            SurveyError::Storage(e) => AppError::internal("Failed to record survey submission")
                .with_action("Retry the submission later")
                .with_source(e)
                .into_response(),
            SurveyError::Serialization(e) => {
                AppError::internal("Failed to encode survey record")
                    .with_source(e)
                    .into_response()
            }
        }
    }
}
