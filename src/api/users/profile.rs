// Profile of the authenticated user, nested under the users module

use axum::{
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::get,
    Extension,
};
use serde_json::json;

use crate::api::users::store::{User, UserStore};
use crate::capabilities::{authentication::{Authentication, Claims}, middlewares::require_bearer};
use crate::routing::{RouteArgs, RouteNode};
use crate::utils::{errors::ApiError, response_handler::HandlerResponse};

/// Expects a `UserStore` as argument 0
pub fn register(node: &mut RouteNode, args: &RouteArgs) -> anyhow::Result<()> {
    let store: UserStore = args.get::<UserStore>(0)?.clone();
    let auth: Authentication = node.authentication().clone();

    node.route("/", get(show_profile))?;
    node.map_router(|router| {
        router
            .route_layer(from_fn_with_state(auth, require_bearer))
            .layer(Extension(store))
    });

    Ok(())
}

async fn show_profile(
    Extension(store): Extension<UserStore>,
    Extension(claims): Extension<Claims>,
) -> Result<HandlerResponse, ApiError> {
    let user: User = store.get(&claims.sub).ok_or(ApiError::NotFound)?;

    Ok(HandlerResponse::new(StatusCode::OK)
        .data(json!({ "user": user, "token_expires_at": claims.exp })))
}
