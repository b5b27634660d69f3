// Start of file: src/main.rs

use std::sync::Arc;
use axum::{serve, Router};
use tokio::net::TcpListener;

use axum_route_tree::config::{environment::EnvironmentVariables, state::AppState};
use axum_route_tree::core::{logging::init_tracing, server::{create_app, setup_listener, shutdown_signal}};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let env: &'static EnvironmentVariables = EnvironmentVariables::instance();
    let state: AppState = AppState::new(Arc::new(env.clone()))?;

    // A broken route tree must never start serving
    let app: Router = create_app(state)?;

    let listener: TcpListener = setup_listener(env).await?;
    tracing::info!("Server listening on: {}", listener.local_addr()?);

    serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

// End of file: src/main.rs
