// Start of file: /src/api/test.rs

// Test endpoints for validating the global layers and the error tail.
// Only mounted when the "test routes" setting is enabled.

use serde_json::json;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use std::time::Duration;
use tracing::{info, instrument};

use crate::config::state::AppState;
use crate::routing::{RouteArgs, RouteNode};
use crate::utils::{errors::ApiError, response_handler::HandlerResponse};

pub fn register(node: &mut RouteNode, _args: &RouteArgs) -> anyhow::Result<()> {
    node.route("/status", get(status_handler))?
        // Sleeps past the configured timeout
        .route("/timeout", get(timeout_test_handler))?
        .route("/error", get(error_test_handler))?
        // Reads the body, so the global body limit applies
        .route("/body-size", post(body_size_test_handler))?;

    Ok(())
}

#[instrument(skip_all)]
async fn status_handler(State(state): State<AppState>) -> HandlerResponse {
    info!("Status endpoint called");

    HandlerResponse::new(StatusCode::OK)
        .data(json!({
            "version": env!("CARGO_PKG_VERSION"),
            "status": "healthy",
            "environment": state.environment.environment.as_ref()
        }))
        .message("API is running successfully")
}

// Endpoint that sleeps longer than the timeout to test the timeout layer
#[instrument(skip_all)]
async fn timeout_test_handler(State(state): State<AppState>) -> HandlerResponse {
    let timeout_seconds: u64 = state.environment.default_timeout_seconds;

    info!("Testing timeout: sleeping for {} seconds (timeout is set to {} seconds)",
          timeout_seconds + 1, timeout_seconds);

    tokio::time::sleep(Duration::from_secs(timeout_seconds + 1)).await;

    // This should never be reached due to timeout
    HandlerResponse::new(StatusCode::OK)
        .message("Timeout test completed (this shouldn't happen)")
}

// Endpoint that deliberately fails to test the error handler
#[instrument(skip_all)]
async fn error_test_handler() -> Result<HandlerResponse, ApiError> {
    info!("Testing deliberate 500 error");

    Err(ApiError::Internal("Deliberate 500 error for testing purposes".to_string()))
}

// Endpoint that reads the request body to test body size limits
#[instrument(skip_all)]
async fn body_size_test_handler(State(state): State<AppState>, body: Bytes) -> HandlerResponse {
    let max_size: usize = state.environment.max_request_body_size;
    let body_size: usize = body.len();

    info!("Testing body size: received {} bytes (max allowed: {} bytes)",
          body_size, max_size);

    HandlerResponse::new(StatusCode::OK)
        .data(json!({
            "received_body_size": body_size,
            "max_allowed_size": max_size,
        }))
        .message(format!("Successfully processed body of {} bytes", body_size))
}

// End of file: /src/api/test.rs
