/*
    * Capability set injected into every route node: key derivation,
    * authentication, middleware factories, schema expectations and tools.
*/

pub mod authentication;
pub mod expect;
pub mod kdf;
pub mod middlewares;
pub mod tools;

use anyhow::Context;

use crate::config::environment::EnvironmentVariables;
use crate::config::settings::{self, Settings};
use authentication::Authentication;
use expect::Expect;
use kdf::Kdf;
use middlewares::Middlewares;
use tools::Tools;

/// Shared by `Arc`; no node owns a private copy.
#[derive(Debug, Clone)]
pub struct Capabilities {
    pub kdf: Kdf,
    pub authentication: Authentication,
    pub middlewares: Middlewares,
    pub expect: Expect,
    pub tools: Tools,
}

impl Capabilities {
    pub fn from_environment(env: &EnvironmentVariables, settings: &Settings) -> anyhow::Result<Self> {
        let kdf: Kdf = Kdf::new(env.kdf_memory_kib, env.kdf_iterations, env.kdf_parallelism)
            .context("Invalid KDF_* configuration")?;

        Ok(Self {
            kdf,
            authentication: Authentication::new(
                env.jwt_secret.as_bytes(),
                env.jwt_issuer.as_ref(),
                env.token_ttl_seconds,
            ),
            middlewares: Middlewares::new(settings.enabled(settings::EXPOSE_ERRORS)),
            expect: Expect,
            tools: Tools,
        })
    }
}
