// Session route module: exchanges credentials for a bearer token

use axum::{
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::{get, post},
    Extension,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::api::users::store::{User, UserStore};
use crate::capabilities::{
    authentication::{Authentication, Claims},
    expect::ValidatedJson,
    middlewares::require_bearer,
};
use crate::config::state::AppState;
use crate::routing::{RouteArgs, RouteNode};
use crate::utils::{errors::ApiError, response_handler::HandlerResponse};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Expects a `UserStore` as argument 0
pub fn register(node: &mut RouteNode, args: &RouteArgs) -> anyhow::Result<()> {
    let store: UserStore = args.get::<UserStore>(0)?.clone();
    let auth: Authentication = node.authentication().clone();

    node.route("/", post(login))?;
    node.route(
        "/verify",
        get(verify).route_layer(from_fn_with_state(auth, require_bearer)),
    )?;
    node.map_router(|router| router.layer(Extension(store)));

    Ok(())
}

#[instrument(skip_all)]
async fn login(
    State(state): State<AppState>,
    Extension(store): Extension<UserStore>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<HandlerResponse, ApiError> {
    let Some(user) = store.get(&payload.username) else {
        warn!("Login attempt for an unknown user");
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    };

    let kdf = state.capabilities.kdf.clone();
    let User { password_hash, username, .. } = user;
    let password: String = payload.password;
    let valid: bool = tokio::task::spawn_blocking(move || kdf.verify_password(&password, &password_hash))
        .await
        .map_err(ApiError::internal)?;

    if !valid {
        warn!(%username, "Login attempt with a wrong password");
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let token: String = state
        .capabilities
        .authentication
        .issue(&username)
        .map_err(ApiError::internal)?;

    info!(%username, "Session issued");

    Ok(HandlerResponse::new(StatusCode::OK)
        .data(json!({
            "token": token,
            "token_type": "Bearer",
            "expires_in": state.environment.token_ttl_seconds,
        }))
        .message("Session created"))
}

async fn verify(Extension(claims): Extension<Claims>) -> HandlerResponse {
    HandlerResponse::new(StatusCode::OK).data(json!(claims))
}
