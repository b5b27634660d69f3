use std::{
    any::{type_name, Any},
    fmt,
    sync::Arc,
};

use crate::routing::error::BuildError;

/// Positional values forwarded verbatim to a route module.
#[derive(Clone, Default)]
pub struct RouteArgs {
    values: Vec<Arc<dyn Any + Send + Sync>>,
}

impl RouteArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.push(value);
        self
    }

    pub fn push<T: Any + Send + Sync>(&mut self, value: T) {
        self.values.push(Arc::new(value));
    }

    /// The argument at `index`, if it exists and is a `T`
    pub fn get<T: Any>(&self, index: usize) -> Result<&T, BuildError> {
        self.values
            .get(index)
            .and_then(|value| value.downcast_ref::<T>())
            .ok_or(BuildError::Argument {
                index,
                expected: type_name::<T>(),
            })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for RouteArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteArgs").field("len", &self.values.len()).finish()
    }
}
