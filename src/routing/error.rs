/// Failures while building the route tree. Any of them aborts startup.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("no route module registered for '{path}' (or '{path}/index')")]
    ModuleNotFound { path: String },

    #[error("'{route}' cannot be used as a mount path")]
    InvalidMountPath { route: String },

    #[error("'{path}' is not a valid route path; it must start with '/'")]
    InvalidRoutePath { path: String },

    #[error("'{route}' is already mounted under '{scope}'")]
    DuplicateMount { scope: String, route: String },

    #[error("route argument {index} is missing or is not a {expected}")]
    Argument { index: usize, expected: &'static str },

    #[error("route module '{path}' failed to register: {message}")]
    Registration { path: String, message: String },
}

impl BuildError {
    /// Keeps errors the builder raised itself; wraps anything else the module returned
    pub(crate) fn from_registration(path: &str, err: anyhow::Error) -> Self {
        match err.downcast::<BuildError>() {
            Ok(build_error) => build_error,
            Err(other) => BuildError::Registration {
                path: path.to_string(),
                message: format!("{other:#}"),
            },
        }
    }
}
