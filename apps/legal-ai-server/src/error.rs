//! Error types for the legal document server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use clause_engine::{EngineError, GenerationError};
use doc_extract::ExtractionError;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0}")]
    EmptyInput(String),

    #[error("No document has been uploaded")]
    NoDocument,

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<EngineError> for ServerError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::EmptyInput(_) => ServerError::EmptyInput(err.to_string()),
            EngineError::NoDocument => ServerError::NoDocument,
            EngineError::ClauseNotFound(_) => ServerError::InvalidRequest(err.to_string()),
            EngineError::Generation(e) => ServerError::Generation(e),
        }
    }
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ServerError::SessionNotFound(_) => (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND"),
            ServerError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
            ServerError::EmptyInput(_) => (StatusCode::BAD_REQUEST, "EMPTY_INPUT"),
            ServerError::NoDocument => (StatusCode::CONFLICT, "NO_DOCUMENT"),
            ServerError::Extraction(_) => (StatusCode::UNPROCESSABLE_ENTITY, "EXTRACTION_FAILED"),
            ServerError::Generation(e) => {
                tracing::warn!("Generation service error: {}", e);
                (StatusCode::BAD_GATEWAY, "GENERATION_FAILED")
            }
            ServerError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
