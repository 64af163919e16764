use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_valid::{ValidRejection, ValidationRejection};
use serde_json::json;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoachingError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("storage failure: {0}")]
    Storage(String),
}

impl CoachingError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CoachingError::Validation(_) => StatusCode::BAD_REQUEST,
            CoachingError::NotFound(_) => StatusCode::NOT_FOUND,
            CoachingError::Conflict(_) => StatusCode::CONFLICT,
            CoachingError::Forbidden(_) => StatusCode::FORBIDDEN,
            CoachingError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for CoachingError {
    fn from(errors: ValidationErrors) -> Self {
        CoachingError::Validation(errors.to_string())
    }
}

impl From<JsonRejection> for CoachingError {
    fn from(rejection: JsonRejection) -> Self {
        CoachingError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for CoachingError {
    fn from(rejection: PathRejection) -> Self {
        CoachingError::Validation(rejection.body_text())
    }
}

impl From<ValidRejection<JsonRejection>> for CoachingError {
    fn from(rejection: ValidRejection<JsonRejection>) -> Self {
        match rejection {
            ValidationRejection::Valid(errors) => errors.into(),
            ValidationRejection::Inner(rejection) => rejection.into(),
        }
    }
}

impl IntoResponse for CoachingError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            CoachingError::Storage(details) => {
                // Storage details stay in the log.
                error!(%details, "Request failed in the record store");
                "storage failure".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
