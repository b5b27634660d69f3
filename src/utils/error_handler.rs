// Global error handling for HTTP middleware layers

use axum::BoxError;
use std::error::Error;
// tower's error type for timeouts
use tower::timeout::error::Elapsed;
// Axum uses http_body_util for length-limiting
use http_body_util::LengthLimitError;

use crate::utils::errors::ApiError;

/// Maps errors raised by the global tower layers to an `ApiError`.
/// The outermost error handler renders it like any other.
pub async fn handle_global_error(err: BoxError) -> ApiError {
    // 413 if the body was too large
    if err.is::<LengthLimitError>() || find_cause::<LengthLimitError>(&*err).is_some() {
        return ApiError::PayloadTooLarge;
    }

    // 408 if the request took too long
    if err.is::<Elapsed>() {
        return ApiError::Timeout;
    }

    // Otherwise, 500
    tracing::error!("Unhandled layer error: {}", err);
    ApiError::internal(err)
}

/// Helper function to find specific error type in error chain
pub fn find_cause<T: Error + 'static>(err: &dyn Error) -> Option<&T> {
    let mut source: Option<&dyn Error> = err.source();

    while let Some(s) = source {
        if let Some(typed) = s.downcast_ref::<T>() {
            return Some(typed);
        }
        source = s.source();
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn timeouts_map_to_408() {
        let err: BoxError = Box::new(Elapsed::new());
        let mapped: ApiError = handle_global_error(err).await;

        assert_eq!(mapped.status_code(), StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn unknown_errors_map_to_500() {
        let err: BoxError = "boom".into();
        let mapped: ApiError = handle_global_error(err).await;

        assert_eq!(mapped.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(mapped.to_string().contains("boom"));
    }
}
