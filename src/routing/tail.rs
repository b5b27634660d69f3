// Handlers appended after every route module: not-found fallback and
// validation-error normalisation. The generic error handler comes from the
// shared middlewares.

use axum::{
    extract::Request,
    http::{Method, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::capabilities::expect::ValidationRejection;
use crate::utils::errors::ApiError;

/// Catch-all for anything the module did not match. Forwards a 404 error to
/// the error handler instead of responding directly.
pub async fn not_found(method: Method, uri: Uri) -> ApiError {
    tracing::debug!(%method, path = uri.path(), "No route matched");
    ApiError::NotFound
}

/// Turns the validator's rejection into the shared `ApiError` shape
pub async fn normalize_validation_errors(req: Request, next: Next) -> Response {
    let mut response: Response = next.run(req).await;

    match response.extensions_mut().remove::<ValidationRejection>() {
        Some(rejection) => ApiError::from(rejection).into_response(),
        None => response,
    }
}
