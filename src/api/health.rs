// Health route module

use axum::{extract::State, http::StatusCode, routing::get};
use serde_json::{json, Value};

use crate::config::{settings, state::AppState};
use crate::routing::{RouteArgs, RouteNode};
use crate::utils::response_handler::HandlerResponse;

pub fn register(node: &mut RouteNode, _args: &RouteArgs) -> anyhow::Result<()> {
    node.route("/", get(health_handler))?;
    Ok(())
}

async fn health_handler(State(state): State<AppState>) -> HandlerResponse {
    let tools = &state.capabilities.tools;

    HandlerResponse::new(StatusCode::OK)
        .data(json!({
            "status": "healthy",
            "env": state.settings.get(settings::ENV).cloned().unwrap_or(Value::Null),
            "app": state.locals.get("app_name").unwrap_or(Value::Null),
            "request_id": tools.new_id(),
            "time": tools.now(),
        }))
        .message("API is running successfully")
}
