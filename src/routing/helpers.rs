use std::sync::Arc;

/// Helpers bound to one mounted route: its name as given to `add_route`
/// and its full scope from the root.
#[derive(Debug, Clone)]
pub struct RouteHelpers {
    route_name: Arc<str>,
    scope: Arc<str>,
}

impl RouteHelpers {
    pub(crate) fn new(route_name: &str, scope: &str) -> Self {
        Self {
            route_name: Arc::from(route_name),
            scope: Arc::from(scope),
        }
    }

    pub fn route_name(&self) -> &str {
        &self.route_name
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Absolute path of `path` under this route
    pub fn url(&self, path: &str) -> String {
        let path: &str = path.trim_matches('/');

        match (self.scope.as_ref(), path.is_empty()) {
            (scope, true) => scope.to_string(),
            ("/", false) => format!("/{path}"),
            (scope, false) => format!("{scope}/{path}"),
        }
    }

    /// Key for `name` in the shared locals, namespaced by this route
    pub fn local_key(&self, name: &str) -> String {
        format!("{}.{}", self.scope, name)
    }
}
