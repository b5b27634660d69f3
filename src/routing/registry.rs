use std::{collections::HashMap, fmt, sync::Arc};

use crate::routing::{args::RouteArgs, base_path::BasePath, node::RouteNode};

/// Registration entry point of a route module.
pub type RegisterFn = dyn Fn(&mut RouteNode, &RouteArgs) -> anyhow::Result<()> + Send + Sync;

/// Maps logical module paths to registration functions.
///
/// Keys are resolved from the root, so `"users/profile"`, `"/users/profile"`
/// and `"users/./profile/"` name the same module.
#[derive(Clone, Default)]
pub struct ModuleRegistry {
    modules: HashMap<BasePath, Arc<RegisterFn>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, path: &str, register: F) -> &mut Self
    where
        F: Fn(&mut RouteNode, &RouteArgs) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let key: BasePath = BasePath::root().resolve(path);

        if self.modules.insert(key.clone(), Arc::new(register)).is_some() {
            tracing::warn!(module = %key, "Route module registered twice, keeping the last one");
        }

        self
    }

    pub fn with<F>(mut self, path: &str, register: F) -> Self
    where
        F: Fn(&mut RouteNode, &RouteArgs) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.register(path, register);
        self
    }

    /// Looks up `path`, then `path/index`
    pub fn resolve(&self, path: &BasePath) -> Option<Arc<RegisterFn>> {
        self.modules
            .get(path)
            .or_else(|| self.modules.get(&path.resolve("index")))
            .cloned()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.resolve(&BasePath::root().resolve(path)).is_some()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut paths: Vec<&str> = self.modules.keys().map(BasePath::as_str).collect();
        paths.sort_unstable();
        f.debug_struct("ModuleRegistry").field("modules", &paths).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &mut RouteNode, _: &RouteArgs) -> anyhow::Result<()> {
        Ok(())
    }

    #[test]
    fn keys_are_normalised() {
        let registry: ModuleRegistry = ModuleRegistry::new().with("users/./profile/", noop);

        assert!(registry.contains("/users/profile"));
        assert!(registry.contains("users/profile"));
        assert!(!registry.contains("users"));
    }

    #[test]
    fn index_modules_stand_in_for_their_directory() {
        let registry: ModuleRegistry = ModuleRegistry::new().with("auth/index", noop);

        assert!(registry.resolve(&BasePath::root().resolve("auth")).is_some());
        assert!(registry.resolve(&BasePath::root().resolve("auth/index")).is_some());
    }
}
