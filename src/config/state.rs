// Application state handed to every request handler

use std::sync::Arc;

use crate::capabilities::Capabilities;
use crate::config::environment::EnvironmentVariables;
use crate::config::locals::Locals;
use crate::config::settings::{self, Settings};

#[derive(Clone)]
pub struct AppState {
    pub environment: Arc<EnvironmentVariables>,
    pub settings: Settings,
    pub locals: Locals,
    pub capabilities: Arc<Capabilities>,
}

impl AppState {
    /// Builds the state with settings seeded from the environment
    pub fn new(environment: Arc<EnvironmentVariables>) -> anyhow::Result<Self> {
        let settings: Settings = Settings::from_environment(&environment).build();
        Self::with_settings(environment, settings)
    }

    /// Builds the state with an explicit settings snapshot
    pub fn with_settings(environment: Arc<EnvironmentVariables>, settings: Settings) -> anyhow::Result<Self> {
        let capabilities: Capabilities = Capabilities::from_environment(&environment, &settings)?;

        let locals: Locals = Locals::new();
        locals.insert("app_name", environment.app_name.as_ref());

        tracing::debug!(
            env = %environment.environment,
            expose_errors = settings.enabled(settings::EXPOSE_ERRORS),
            "Application state initialized"
        );

        Ok(Self {
            environment,
            settings,
            locals,
            capabilities: Arc::new(capabilities),
        })
    }
}
