use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use manasooth_bedrock::error::BedrockError;
use manasooth_core::error::CoreError;
use manasooth_instruments::error::{GoalError, InstrumentError};
use manasooth_instruments::scoring::AnswerError;
use manasooth_storage::error::StorageError;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    /// Answers that failed validation, reported item by item.
    InvalidAnswers {
        message: String,
        details: Vec<AnswerError>,
    },
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    details: Vec<AnswerError>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, Vec::new()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, Vec::new()),
            ApiError::InvalidAnswers { message, details } => {
                (StatusCode::BAD_REQUEST, message, details)
            }
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                    Vec::new(),
                )
            }
        };

        (status, Json(ErrorBody { error: message, details })).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound { key } => ApiError::NotFound(format!("object not found: {key}")),
            StorageError::GoalNotFound(id) => ApiError::NotFound(format!("goal not found: {id}")),
            StorageError::Goal(e) => e.into(),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<GoalError> for ApiError {
    fn from(e: GoalError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<InstrumentError> for ApiError {
    fn from(e: InstrumentError) -> Self {
        match e {
            InstrumentError::UnknownQuestionnaire(_) => ApiError::NotFound(e.to_string()),
            InstrumentError::InvalidAnswers { errors, .. } => {
                let message = answers_message(&errors);
                ApiError::InvalidAnswers {
                    message,
                    details: errors,
                }
            }
            InstrumentError::EmptySelection => ApiError::BadRequest(e.to_string()),
        }
    }
}

fn answers_message(errors: &[AnswerError]) -> String {
    match errors {
        [only] => only.message.clone(),
        _ => format!("{} answers are missing or invalid", errors.len()),
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Serialization(e) => ApiError::Internal(e.to_string()),
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<BedrockError> for ApiError {
    fn from(e: BedrockError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<tera::Error> for ApiError {
    fn from(e: tera::Error) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}
