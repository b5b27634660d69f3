//! tests/mod.rs
//! Shared test helpers: a test configuration, app state, and a helper
//! that spawns the full app on an ephemeral port.
#![allow(dead_code)]

use std::sync::Arc;

use axum::{body::Body, http::Request, Router};
use http_body_util::BodyExt;
use serde_json::Value;
use tokio::net::TcpListener as TokioTcpListener;
use tower::ServiceExt;

use axum_route_tree::config::{environment::EnvironmentVariables, state::AppState};
use axum_route_tree::core::server::create_app;

/// Short timeout, small body limit and cheap key derivation
pub fn test_environment() -> EnvironmentVariables {
    EnvironmentVariables {
        default_timeout_seconds: 1,
        max_request_body_size: 1024,
        kdf_memory_kib: 1024,
        kdf_iterations: 1,
        kdf_parallelism: 1,
        ..EnvironmentVariables::default()
    }
}

pub fn test_state() -> AppState {
    AppState::new(Arc::new(test_environment())).expect("Failed to build test state")
}

/// Spawns the app on a random unused port and returns its base URL.
pub fn spawn_app() -> String {
    let app: Router = create_app(test_state()).expect("Failed to build route tree");

    // * Bind an ephemeral port using std::net::TcpListener.
    let std_listener: std::net::TcpListener = std::net::TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    std_listener.set_nonblocking(true).unwrap();

    // * Convert std::net::TcpListener to tokio::net::TcpListener.
    let tokio_listener: TokioTcpListener = TokioTcpListener::from_std(std_listener)
        .expect("Failed to convert to tokio listener");

    let addr: std::net::SocketAddr = tokio_listener.local_addr().unwrap();

    // * Spawn the server in a background task.
    tokio::spawn(async move {
        axum::serve(tokio_listener, app)
            .await
            .expect("Server failed");
    });

    format!("http://{}", addr)
}

/// Sends one request through the router in-process; returns status code and JSON body
pub async fn send(app: &Router, request: Request<Body>) -> (u16, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status: u16 = response.status().as_u16();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
