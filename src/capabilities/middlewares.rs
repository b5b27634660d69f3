// Middleware factories shared by every route node

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tracing::{error, warn};

use crate::capabilities::authentication::{Authentication, Claims};
use crate::utils::errors::{ApiError, Enveloped};
use crate::utils::response_handler::ResponseFormat;

#[derive(Debug, Clone)]
pub struct Middlewares {
    expose_internal_errors: bool,
}

impl Middlewares {
    pub fn new(expose_internal_errors: bool) -> Self {
        Self { expose_internal_errors }
    }

    /// State for `handle_errors` on the node mounted at `scope`
    pub fn error_handler(&self, scope: &str) -> ErrorHandler {
        ErrorHandler {
            scope: Arc::from(scope),
            expose_internal_errors: self.expose_internal_errors,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ErrorHandler {
    scope: Arc<str>,
    expose_internal_errors: bool,
}

impl ErrorHandler {
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Renders an error into the JSON envelope and logs it
    pub fn render(&self, err: ApiError, method: &Method, path: &str) -> Response {
        let status_code: StatusCode = err.status_code();

        if status_code.is_server_error() {
            error!(scope = %self.scope, %method, path, status = status_code.as_u16(), "{}", err);
        } else {
            warn!(scope = %self.scope, %method, path, status = status_code.as_u16(), "{}", err);
        }

        let message: String = match &err {
            ApiError::Internal(_) if !self.expose_internal_errors => "Internal server error".to_string(),
            other => other.to_string(),
        };

        let data: Value = match err {
            ApiError::Validation { errors } => json!({ "fields": errors }),
            _ => Value::Null,
        };

        ResponseFormat::new(status_code, data, vec![message]).into_response()
    }
}

/// Terminal error handler appended to every node.
///
/// Renders an `ApiError` found in the response extensions, or any other
/// 4xx/5xx response that was not rendered yet. Rendered responses pass through.
pub async fn handle_errors(State(handler): State<ErrorHandler>, req: Request, next: Next) -> Response {
    let method: Method = req.method().clone();
    let path: String = req.uri().path().to_owned();

    let mut response: Response = next.run(req).await;

    if response.extensions().get::<Enveloped>().is_some() {
        return response;
    }

    let err: ApiError = match response.extensions_mut().remove::<ApiError>() {
        Some(err) => err,
        None if response.status().is_client_error() || response.status().is_server_error() => {
            error_from_response(response).await
        }
        None => return response,
    };

    handler.render(err, &method, &path)
}

/// Wraps a plain error response (e.g. an axum rejection) into an `ApiError`
async fn error_from_response(response: Response) -> ApiError {
    let status: StatusCode = response.status();
    let body: Body = response.into_body();

    let text: String = match body.collect().await {
        Ok(collected) => String::from_utf8_lossy(&collected.to_bytes()).trim().to_string(),
        Err(_) => String::new(),
    };

    let message: String = if text.is_empty() {
        status.canonical_reason().unwrap_or("Unknown error").to_string()
    } else {
        text
    };

    match status {
        StatusCode::NOT_FOUND => ApiError::NotFound,
        StatusCode::PAYLOAD_TOO_LARGE => ApiError::PayloadTooLarge,
        StatusCode::INTERNAL_SERVER_ERROR => ApiError::Internal(message),
        _ => ApiError::Status { status, message },
    }
}

/// Route layer that requires a valid bearer token and exposes its `Claims`
/// to handlers through the request extensions.
pub async fn require_bearer(
    State(auth): State<Authentication>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims: Claims = Authentication::bearer_token(req.headers())
        .and_then(|token| auth.verify(token))
        .map_err(|e| ApiError::Unauthorized(e.to_string()))?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
