// Start of file: /src/config/environment.rs

// * Environment configuration with a singleton pattern
// * and zero-copy parsing.

use std::{borrow::Cow, collections::HashMap};
// * anyhow for convenient error handling
use anyhow::{Context, Result};
// * once_cell for lazy static initialization
use once_cell::sync::Lazy;
use tracing::warn;

// ! Default values for environment variables (used if variables aren't set):
const DEFAULT_ENVIRONMENT: &str = "development";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_APP_NAME: &str = "axum-route-tree";
const DEFAULT_JWT_SECRET: &str = "change-me-in-production";
const DEFAULT_JWT_ISSUER: &str = "axum-route-tree";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_BODY_SIZE: usize = 2_097_152; // 2MB
const DEFAULT_TIMEOUT: u64 = 3; // 3 seconds
const DEFAULT_TOKEN_TTL: u64 = 3600; // 1 hour
const DEFAULT_KDF_MEMORY_KIB: u32 = 19_456; // 19 MiB
const DEFAULT_KDF_ITERATIONS: u32 = 2;
const DEFAULT_KDF_PARALLELISM: u32 = 1;

// * A struct containing all environment variables used by the app
#[derive(Clone, Debug)]
pub struct EnvironmentVariables {
    pub environment: Cow<'static, str>,
    pub app_name: Cow<'static, str>,
    pub host: Cow<'static, str>,
    pub port: u16,
    pub max_request_body_size: usize,
    pub default_timeout_seconds: u64,
    pub jwt_secret: Cow<'static, str>,
    pub jwt_issuer: Cow<'static, str>,
    pub token_ttl_seconds: u64,
    pub kdf_memory_kib: u32,
    pub kdf_iterations: u32,
    pub kdf_parallelism: u32,
}

impl Default for EnvironmentVariables {
    fn default() -> Self {
        Self {
            environment: Cow::Borrowed(DEFAULT_ENVIRONMENT),
            app_name: Cow::Borrowed(DEFAULT_APP_NAME),
            host: Cow::Borrowed(DEFAULT_HOST),
            port: DEFAULT_PORT,
            max_request_body_size: DEFAULT_MAX_BODY_SIZE,
            default_timeout_seconds: DEFAULT_TIMEOUT,
            jwt_secret: Cow::Borrowed(DEFAULT_JWT_SECRET),
            jwt_issuer: Cow::Borrowed(DEFAULT_JWT_ISSUER),
            token_ttl_seconds: DEFAULT_TOKEN_TTL,
            kdf_memory_kib: DEFAULT_KDF_MEMORY_KIB,
            kdf_iterations: DEFAULT_KDF_ITERATIONS,
            kdf_parallelism: DEFAULT_KDF_PARALLELISM,
        }
    }
}

impl EnvironmentVariables {
    // * Loads environment variables.
    // * Only reads .env if ENVIRONMENT != "production".
    pub fn load() -> Result<Self> {
        // ? In non-production environments, attempt to load .env
        if std::env::var("ENVIRONMENT").unwrap_or_default() != "production" {
            dotenv::dotenv().ok();
        }

        // * Collect all environment vars from the system and .env
        let vars: HashMap<String, String> = std::env::vars()
            .chain(dotenv::vars())
            .collect();

        Self::from_vars(&vars)
    }

    // * Builds the configuration from an explicit variable map, providing defaults if missing
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        let get_var = |key: &str| vars.get(key).map(String::as_str);

        let environment: Cow<'static, str> = get_var("ENVIRONMENT")
            .map(|s| Cow::Owned(s.into()))
            .unwrap_or_else(|| {
                warn!("Missing ENVIRONMENT, defaulting to '{DEFAULT_ENVIRONMENT}'");
                Cow::Borrowed(DEFAULT_ENVIRONMENT)
            });

        let jwt_secret: Cow<'static, str> = match get_var("JWT_SECRET") {
            Some(secret) => Cow::Owned(secret.into()),
            None if environment == "production" => {
                anyhow::bail!("JWT_SECRET must be set in production")
            }
            None => {
                warn!("Missing JWT_SECRET, using the development default");
                Cow::Borrowed(DEFAULT_JWT_SECRET)
            }
        };

        Ok(Self {
            environment,
            jwt_secret,

            app_name: get_var("APP_NAME")
                .map(|s| Cow::Owned(s.into()))
                .unwrap_or(Cow::Borrowed(DEFAULT_APP_NAME)),

            host: get_var("HOST")
                .map(|s| Cow::Owned(s.into()))
                .unwrap_or(Cow::Borrowed(DEFAULT_HOST)),

            port: get_var("PORT")
                .map(|s| s.parse().context("Invalid PORT value"))
                .transpose()?
                .unwrap_or(DEFAULT_PORT),

            max_request_body_size: get_var("MAX_REQUEST_BODY_SIZE")
                .map(|s| s.parse().context("Invalid MAX_REQUEST_BODY_SIZE"))
                .transpose()?
                .unwrap_or(DEFAULT_MAX_BODY_SIZE),

            default_timeout_seconds: get_var("DEFAULT_TIMEOUT_SECONDS")
                .map(|s| s.parse().context("Invalid DEFAULT_TIMEOUT_SECONDS"))
                .transpose()?
                .unwrap_or(DEFAULT_TIMEOUT),

            jwt_issuer: get_var("JWT_ISSUER")
                .map(|s| Cow::Owned(s.into()))
                .unwrap_or(Cow::Borrowed(DEFAULT_JWT_ISSUER)),

            token_ttl_seconds: get_var("TOKEN_TTL_SECONDS")
                .map(|s| s.parse().context("Invalid TOKEN_TTL_SECONDS"))
                .transpose()?
                .unwrap_or(DEFAULT_TOKEN_TTL),

            kdf_memory_kib: get_var("KDF_MEMORY_KIB")
                .map(|s| s.parse().context("Invalid KDF_MEMORY_KIB"))
                .transpose()?
                .unwrap_or(DEFAULT_KDF_MEMORY_KIB),

            kdf_iterations: get_var("KDF_ITERATIONS")
                .map(|s| s.parse().context("Invalid KDF_ITERATIONS"))
                .transpose()?
                .unwrap_or(DEFAULT_KDF_ITERATIONS),

            kdf_parallelism: get_var("KDF_PARALLELISM")
                .map(|s| s.parse().context("Invalid KDF_PARALLELISM"))
                .transpose()?
                .unwrap_or(DEFAULT_KDF_PARALLELISM),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    // * Returns a reference to the lazily-initialized environment configuration
    pub fn instance() -> &'static Self {
        static INSTANCE: Lazy<Result<EnvironmentVariables, anyhow::Error>> = Lazy::new(|| {
            let config: EnvironmentVariables = EnvironmentVariables::load()?;

            if cfg!(debug_assertions) {
                tracing::debug!("Loaded environment configuration: {:#?}", config);
            }

            Ok(config)
        });

        // ! Panics if loading fails
        INSTANCE.as_ref().expect("Failed to load environment configuration")
    }
}


// End of file: /src/config/environment.rs
