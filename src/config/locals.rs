// Application-wide key/value bag shared by reference with every route node

use std::sync::Arc;
use dashmap::DashMap;
use serde_json::Value;

#[derive(Debug, Clone, Default)]
pub struct Locals {
    values: Arc<DashMap<String, Value>>,
}

impl Locals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a value, returning the previous one if any
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.values.remove(key).map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn writes_are_visible_through_every_clone() {
        let locals: Locals = Locals::new();
        let node_view: Locals = locals.clone();

        node_view.insert("app_name", "demo");

        assert_eq!(locals.get("app_name"), Some(json!("demo")));
        assert_eq!(locals.remove("app_name"), Some(json!("demo")));
        assert!(node_view.is_empty());
    }
}
