// Unified response system for consistent API responses
// Provides HandlerResponse and the ResponseFormat envelope every response is rendered into

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::errors::Enveloped;

/// Standard JSON response format for all API endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ResponseFormat {
    pub status: String,          // HTTP status text (e.g. "OK", "NOT_FOUND")
    pub code: u16,               // HTTP status code
    pub data: serde_json::Value, // Response payload
    pub messages: Vec<String>,   // Informational messages
    pub date: String,            // ISO timestamp
}

impl ResponseFormat {
    pub fn new(status_code: StatusCode, data: Value, messages: Vec<String>) -> Self {
        Self {
            status: status_label(status_code),
            code: status_code.as_u16(),
            data,
            messages,
            date: Utc::now().to_rfc3339(),
        }
    }
}

impl IntoResponse for ResponseFormat {
    fn into_response(self) -> Response {
        let status_code: StatusCode = StatusCode::from_u16(self.code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response: Response = (status_code, Json(self)).into_response();
        response.extensions_mut().insert(Enveloped);
        response
    }
}

/// "Not Found" -> "NOT_FOUND"
pub fn status_label(status_code: StatusCode) -> String {
    status_code
        .canonical_reason()
        .unwrap_or("UNKNOWN STATUS")
        .to_uppercase()
        .replace(' ', "_")
}

/// Convenience struct for building responses in handlers
#[derive(Debug, Clone)]
pub struct HandlerResponse {
    pub status_code: StatusCode,
    pub data: serde_json::Value,
    pub messages: Vec<String>,
}

impl HandlerResponse {
    /// Creates a new response with specified status code
    pub fn new(status_code: StatusCode) -> Self {
        Self {
            status_code,
            data: serde_json::Value::Null,
            messages: Vec::new(),
        }
    }

    /// Adds JSON data payload to the response
    pub fn data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }

    /// Adds an informational message to the response
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.messages.push(message.into());
        self
    }
}

impl IntoResponse for HandlerResponse {
    fn into_response(self) -> Response {
        ResponseFormat::new(self.status_code, self.data, self.messages).into_response()
    }
}
