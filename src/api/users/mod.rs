// Users route module: listing and sign-up, with the profile module nested below

pub mod profile;
pub mod store;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Extension,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use validator::Validate;

use crate::capabilities::expect::{ValidatedJson, ValidatedQuery};
use crate::config::state::AppState;
use crate::routing::{RouteArgs, RouteHelpers, RouteNode};
use crate::utils::{errors::ApiError, response_handler::HandlerResponse};
use store::{User, UserStore};

const DEFAULT_PAGE_SIZE: usize = 50;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 32, message = "username must be 3 to 32 characters"))]
    pub username: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ListUsersQuery {
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<usize>,
}

/// Expects a `UserStore` as argument 0
pub fn register(node: &mut RouteNode, args: &RouteArgs) -> anyhow::Result<()> {
    let store: UserStore = args.get::<UserStore>(0)?.clone();

    let helpers: RouteHelpers = node.helpers().clone();

    node.route("/", get(list_users).post(create_user))?;
    node.map_router(|router| {
        router
            .layer(Extension(store.clone()))
            .layer(Extension(helpers))
    });

    node.add_route_with("profile", RouteArgs::new().with(store))?;
    Ok(())
}

#[instrument(skip_all)]
async fn list_users(
    Extension(store): Extension<UserStore>,
    Extension(helpers): Extension<RouteHelpers>,
    ValidatedQuery(query): ValidatedQuery<ListUsersQuery>,
) -> HandlerResponse {
    let users: Vec<User> = store.list(query.limit.unwrap_or(DEFAULT_PAGE_SIZE));

    HandlerResponse::new(StatusCode::OK)
        .data(json!({
            "users": users,
            "total": store.len(),
            "profile": helpers.url("profile"),
        }))
}

#[instrument(skip_all)]
async fn create_user(
    State(state): State<AppState>,
    Extension(store): Extension<UserStore>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> Result<HandlerResponse, ApiError> {
    if store.get(&payload.username).is_some() {
        return Err(ApiError::Conflict(format!(
            "Username '{}' is already taken",
            payload.username
        )));
    }

    let kdf = state.capabilities.kdf.clone();
    let password: String = payload.password;
    let password_hash: String = tokio::task::spawn_blocking(move || kdf.hash_password(&password))
        .await
        .map_err(ApiError::internal)?
        .map_err(ApiError::internal)?;

    let tools = &state.capabilities.tools;
    let user: User = store.insert(User {
        id: tools.new_id(),
        username: payload.username,
        email: payload.email,
        created_at: tools.now(),
        password_hash,
    })?;

    info!(user_id = %user.id, "User created");

    Ok(HandlerResponse::new(StatusCode::CREATED)
        .data(json!(user))
        .message("User created"))
}
