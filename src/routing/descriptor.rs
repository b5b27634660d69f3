use crate::routing::error::BuildError;

/// Mount path and module identifier for one route.
///
/// A bare name is used for both; a pair lets the mount path and the module
/// differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    route: String,
    module: String,
}

impl RouteDescriptor {
    pub fn new(route: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            module: module.into(),
        }
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    /// The route name as an axum nest path: leading `/`, no trailing `/`.
    /// The root cannot be a mount point.
    pub fn mount_path(&self) -> Result<String, BuildError> {
        let trimmed: &str = self.route.trim().trim_matches('/');

        if trimmed.is_empty() {
            return Err(BuildError::InvalidMountPath {
                route: self.route.clone(),
            });
        }

        Ok(format!("/{trimmed}"))
    }
}

impl From<&str> for RouteDescriptor {
    fn from(name: &str) -> Self {
        Self::new(name, name)
    }
}

impl From<String> for RouteDescriptor {
    fn from(name: String) -> Self {
        Self::new(name.clone(), name)
    }
}

impl From<(&str, &str)> for RouteDescriptor {
    fn from((route, module): (&str, &str)) -> Self {
        Self::new(route, module)
    }
}
