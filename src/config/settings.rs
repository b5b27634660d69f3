// Read-only application settings shared by every route node

use std::{collections::HashMap, sync::Arc};
use serde_json::Value;

use crate::config::environment::EnvironmentVariables;

pub const ENV: &str = "env";
pub const APP_NAME: &str = "app name";
pub const TEST_ROUTES: &str = "test routes";
pub const EXPOSE_ERRORS: &str = "expose errors";

/// Frozen snapshot of the root application's settings.
///
/// Cloning is cheap: every node holds the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    values: Arc<HashMap<String, Value>>,
}

impl Settings {
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::default()
    }

    /// Seeds the settings the rest of the app reads from the environment
    pub fn from_environment(env: &EnvironmentVariables) -> SettingsBuilder {
        let production: bool = env.is_production();

        Self::builder()
            .set(ENV, env.environment.as_ref())
            .set(APP_NAME, env.app_name.as_ref())
            .set(TEST_ROUTES, !production)
            .set(EXPOSE_ERRORS, !production)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// True when the setting exists and is truthy
    pub fn enabled(&self, key: &str) -> bool {
        self.get(key).is_some_and(is_truthy)
    }

    pub fn disabled(&self, key: &str) -> bool {
        !self.enabled(key)
    }
}

#[derive(Debug, Default)]
pub struct SettingsBuilder {
    values: HashMap<String, Value>,
}

impl SettingsBuilder {
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn enable(self, key: impl Into<String>) -> Self {
        self.set(key, true)
    }

    pub fn disable(self, key: impl Into<String>) -> Self {
        self.set(key, false)
    }

    pub fn build(self) -> Settings {
        Settings {
            values: Arc::new(self.values),
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn enabled_follows_truthiness() {
        let settings: Settings = Settings::builder()
            .enable("trust proxy")
            .disable("etag")
            .set("retries", 0)
            .set("title", "")
            .set("views", json!(["a"]))
            .build();

        assert!(settings.enabled("trust proxy"));
        assert!(settings.disabled("etag"));
        assert!(settings.disabled("retries"));
        assert!(settings.disabled("title"));
        assert!(settings.enabled("views"));
        assert!(settings.disabled("never set"));
    }

    #[test]
    fn production_disables_test_routes_and_error_details() {
        let env: EnvironmentVariables = EnvironmentVariables {
            environment: "production".into(),
            ..EnvironmentVariables::default()
        };
        let settings: Settings = Settings::from_environment(&env).build();

        assert_eq!(settings.get(ENV), Some(&json!("production")));
        assert!(settings.disabled(TEST_ROUTES));
        assert!(settings.disabled(EXPOSE_ERRORS));
    }

    #[test]
    fn clones_share_the_snapshot() {
        let settings: Settings = Settings::builder().set("a", 1).build();
        let copy: Settings = settings.clone();

        assert!(Arc::ptr_eq(&settings.values, &copy.values));
    }
}
