// Library root for the route-tree Axum API

pub mod api;
pub mod capabilities;
pub mod config;
pub mod core;
pub mod routing;
pub mod utils;

pub use crate::capabilities::Capabilities;
pub use crate::config::environment::EnvironmentVariables;
pub use crate::config::state::AppState;
pub use crate::routing::{BuildError, ModuleRegistry, RouteArgs, RouteDescriptor, RouteHelpers, RouteNode};
pub use crate::utils::errors::ApiError;
