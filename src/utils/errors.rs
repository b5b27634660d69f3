// Request-time error model shared by handlers, tail handlers and the error handler

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// One field that failed a schema expectation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub code: String,
    pub message: String,
}

/// Errors produced while serving a request.
///
/// Converting into a response does not render anything: the error is stored
/// in the response extensions and the node's error handler turns it into the
/// JSON envelope.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    #[error("Not found")]
    NotFound,

    #[error("Validation failed")]
    Validation { errors: Vec<FieldError> },

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Request body too large")]
    PayloadTooLarge,

    /// A response some other layer produced with an error status
    #[error("{message}")]
    Status { status: StatusCode, message: String },

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Validation { .. } | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Status { status, .. } => *status,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn internal(err: impl std::fmt::Display) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response: Response = self.status_code().into_response();
        response.extensions_mut().insert(self);
        response
    }
}

/// Marks a response whose body already is the JSON envelope
#[derive(Debug, Clone, Copy)]
pub struct Enveloped;
