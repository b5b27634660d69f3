// Application server configuration and setup

use std::time::Duration;
use axum::{
    Router,
    middleware::from_fn_with_state,
    extract::DefaultBodyLimit,
    error_handling::HandleErrorLayer,
};
use tower::{Layer, ServiceBuilder, timeout::TimeoutLayer};
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tokio::{signal, net::TcpListener};
use listenfd::ListenFd;
use anyhow::Result;

use crate::api;
use crate::capabilities::middlewares::{handle_errors, ErrorHandler};
use crate::config::{environment::EnvironmentVariables, state::AppState};
use crate::routing::{BuildError, ModuleRegistry, RouteNode};
use crate::utils::error_handler::handle_global_error;

/// Builds the application route tree from the API modules
pub fn create_app(state: AppState) -> Result<Router, BuildError> {
    build_app(state, api::registry(), api::mount)
}

/// Builds a route tree from `registry`, letting `mount` add the top-level
/// routes, and wraps it in the global layers.
///
/// Trailing slashes are trimmed before routing, so a module's `/` route
/// answers both `<mount>` and `<mount>/`.
pub fn build_app<F>(state: AppState, registry: ModuleRegistry, mount: F) -> Result<Router, BuildError>
where
    F: FnOnce(&mut RouteNode) -> Result<(), BuildError>,
{
    let mut root: RouteNode = RouteNode::root(&state, registry);
    mount(&mut root)?;

    let env: &EnvironmentVariables = &state.environment;
    // Renders errors raised by the layers below, outside any node
    let outer_handler: ErrorHandler = state.capabilities.middlewares.error_handler("/");

    let app: Router = root
        .finish()
        .layer(
            ServiceBuilder::new()
                .layer(from_fn_with_state(outer_handler, handle_errors))
                .layer(HandleErrorLayer::new(handle_global_error))
                .layer(TimeoutLayer::new(Duration::from_secs(env.default_timeout_seconds)))
                .layer(DefaultBodyLimit::max(env.max_request_body_size))
        )
        .with_state(state);

    // * Routing happens before router layers run, so the path is normalised
    // * by a service wrapped around the whole tree
    let normalized: NormalizePath<Router> = NormalizePathLayer::trim_trailing_slash().layer(app);

    Ok(Router::new().fallback_service(normalized))
}

/// Sets up the TCP listener from environment or binds to new address
pub async fn setup_listener(env: &EnvironmentVariables) -> Result<TcpListener> {
    let mut listenfd: ListenFd = ListenFd::from_env();

    let listener: TcpListener = match listenfd.take_tcp_listener(0)? {
        Some(std_listener) => {
            std_listener.set_nonblocking(true)?;
            TcpListener::from_std(std_listener)?
        }
        None => {
            let addr: String = format!("{}:{}", env.host, env.port);
            TcpListener::bind(&addr).await?
        }
    };

    Ok(listener)
}

/// Handles graceful shutdown signals (Ctrl+C and TERM)
pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Terminate signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate: std::future::Pending<()> = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Shutting down via Ctrl+C"),
        _ = terminate => tracing::info!("Shutting down via TERM signal"),
    }
}
