/*
    * API route modules and the registry that maps their logical paths
    * to registration functions.
*/

pub mod auth;
pub mod health;
pub mod test;
pub mod users;

use crate::config::settings;
use crate::routing::{BuildError, ModuleRegistry, RouteArgs, RouteNode};
use users::store::UserStore;

pub fn registry() -> ModuleRegistry {
    ModuleRegistry::new()
        .with("health", health::register)
        .with("users", users::register)
        .with("users/profile", users::profile::register)
        .with("auth/index", auth::register)
        .with("test", test::register)
}

/// Mounts the top-level routes on the root node
pub fn mount(root: &mut RouteNode) -> Result<(), BuildError> {
    let store: UserStore = UserStore::new();

    root.add_route("health")?;
    root.add_route_with("users", RouteArgs::new().with(store.clone()))?;
    // Served at /session, built from the auth module
    root.add_route_with(("session", "auth"), RouteArgs::new().with(store))?;

    if root.settings().enabled(settings::TEST_ROUTES) {
        root.add_route("test")?;
    }

    Ok(())
}
