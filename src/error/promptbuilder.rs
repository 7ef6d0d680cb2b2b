use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error as ThisError;

use super::llm::LlmError;

#[derive(Debug, ThisError)]
pub enum PromptBuilderError {
    #[error("{0}")]
    Validation(String),

    #[error("invalid JSON body: {0}")]
    InvalidJson(String),

    #[error("Template rendering error: {0}")]
    Render(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("Error generating response: {0}")]
    Llm(#[from] LlmError),

    #[error("An error occurred while importing data: {0}")]
    Import(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),

    #[error("Ractor error: {0}")]
    RactorError(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl PromptBuilderError {
    pub fn not_found(kind: &str, id: i64) -> Self {
        Self::NotFound(format!("{kind} with ID {id} not found"))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidJson(_) | Self::Render(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Llm(_)
            | Self::Import(_)
            | Self::JsonError(_)
            | Self::UnexpectedError(_)
            | Self::RactorError(_)
            | Self::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for PromptBuilderError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::BytesRejection(e) => {
                Self::UnexpectedError(format!("Failed to read request body: {e}"))
            }
            other => Self::InvalidJson(other.body_text()),
        }
    }
}

impl From<PathRejection> for PromptBuilderError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for PromptBuilderError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match &self {
            Self::Validation(msg) => ("VALIDATION_ERROR", msg.clone()),
            Self::InvalidJson(_) => ("INVALID_JSON", self.to_string()),
            Self::Render(_) => ("TEMPLATE_ERROR", self.to_string()),
            Self::NotFound(msg) => ("NOT_FOUND", msg.clone()),
            Self::PayloadTooLarge(msg) => ("PAYLOAD_TOO_LARGE", msg.clone()),
            Self::Llm(_) => ("LLM_ERROR", self.to_string()),
            Self::Import(_) => ("IMPORT_FAILED", self.to_string()),
            Self::JsonError(_)
            | Self::UnexpectedError(_)
            | Self::RactorError(_)
            | Self::DatabaseError(_) => (
                "INTERNAL_ERROR",
                "An internal server error occurred.".to_string(),
            ),
        };

        if status.is_server_error() {
            tracing::error!(status = %status, code, error = %self, "Request failed");
        } else {
            tracing::debug!(status = %status, code, error = %self, "Request rejected");
        }

        let body = ApiErrorBody {
            inner: ApiErrorObject {
                code: code.to_string(),
                message,
            },
        };
        (status, Json(body)).into_response()
    }
}

/// Standardized API error response payload.
#[derive(Debug, Serialize)]
pub struct ApiErrorObject {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    #[serde(rename = "error")]
    pub inner: ApiErrorObject,
}
