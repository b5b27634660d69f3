// Route node: a mountable subtree plus the shared capabilities its module can use

use std::{collections::HashSet, mem, sync::Arc};

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::MethodRouter,
    Router,
};
use tracing::{debug, info};

use crate::capabilities::{
    authentication::Authentication, expect::Expect, kdf::Kdf, middlewares::{self, ErrorHandler, Middlewares},
    tools::Tools, Capabilities,
};
use crate::config::{locals::Locals, settings::Settings, state::AppState};
use crate::routing::{
    args::RouteArgs, base_path::BasePath, descriptor::RouteDescriptor, error::BuildError,
    helpers::RouteHelpers, registry::{ModuleRegistry, RegisterFn}, tail,
};

pub struct RouteNode {
    scope: String,
    base_path: BasePath,
    helpers: RouteHelpers,
    router: Router<AppState>,
    routes: HashSet<String>,
    mounts: HashSet<String>,
    settings: Settings,
    locals: Locals,
    capabilities: Arc<Capabilities>,
    registry: Arc<ModuleRegistry>,
}

impl RouteNode {
    /// The application root: base path and scope `/`
    pub fn root(state: &AppState, registry: ModuleRegistry) -> Self {
        Self {
            scope: "/".to_string(),
            base_path: BasePath::root(),
            helpers: RouteHelpers::new("", "/"),
            router: Router::new(),
            routes: HashSet::new(),
            mounts: HashSet::new(),
            settings: state.settings.clone(),
            locals: state.locals.clone(),
            capabilities: state.capabilities.clone(),
            registry: Arc::new(registry),
        }
    }

    fn child(&self, route_name: &str, mount: &str, base_path: BasePath) -> Self {
        let scope: String = if self.scope == "/" {
            mount.to_string()
        } else {
            format!("{}{}", self.scope, mount)
        };

        Self {
            helpers: RouteHelpers::new(route_name, &scope),
            scope,
            base_path,
            router: Router::new(),
            routes: HashSet::new(),
            mounts: HashSet::new(),
            settings: self.settings.clone(),
            locals: self.locals.clone(),
            capabilities: self.capabilities.clone(),
            registry: self.registry.clone(),
        }
    }

    pub fn add_route(&mut self, descriptor: impl Into<RouteDescriptor>) -> Result<(), BuildError> {
        self.add_route_with(descriptor, RouteArgs::new())
    }

    /// Builds the module named by `descriptor` into a child node and mounts it
    /// here. `args` reach the module's registration function untouched.
    pub fn add_route_with(
        &mut self,
        descriptor: impl Into<RouteDescriptor>,
        args: RouteArgs,
    ) -> Result<(), BuildError> {
        let descriptor: RouteDescriptor = descriptor.into();
        let mount: String = descriptor.mount_path()?;

        if self.is_taken(&mount) {
            return Err(BuildError::DuplicateMount {
                scope: self.scope.clone(),
                route: mount,
            });
        }

        let base_path: BasePath = self.base_path.resolve(descriptor.module());
        let register: Arc<RegisterFn> = self
            .registry
            .resolve(&base_path)
            .ok_or_else(|| BuildError::ModuleNotFound {
                path: base_path.to_string(),
            })?;

        let mut child: RouteNode = self.child(descriptor.route(), &mount, base_path.clone());
        debug!(scope = %child.scope, module = %base_path, args = args.len(), "Building route node");

        (*register)(&mut child, &args)
            .map_err(|err| BuildError::from_registration(base_path.as_str(), err))?;

        let scope: String = child.scope.clone();
        let router: Router<AppState> = child.finish();

        self.router = mem::take(&mut self.router).nest(&mount, router);
        self.mounts.insert(mount);

        info!(scope = %scope, module = %base_path, "Mounted route");
        Ok(())
    }

    fn is_taken(&self, mount: &str) -> bool {
        let nested_prefix: String = format!("{mount}/");

        self.mounts.contains(mount)
            || self
                .routes
                .iter()
                .any(|path| path == mount || path.starts_with(&nested_prefix))
    }

    /// Adds a handler at `path`, relative to this node's mount point.
    /// `path` must start with `/` and must not fall under a mounted route.
    pub fn route(
        &mut self,
        path: &str,
        method_router: MethodRouter<AppState>,
    ) -> Result<&mut Self, BuildError> {
        if !path.starts_with('/') {
            return Err(BuildError::InvalidRoutePath {
                path: path.to_string(),
            });
        }

        let under_mount: bool = self
            .mounts
            .iter()
            .any(|mount| path == mount || path.starts_with(&format!("{mount}/")));

        if under_mount {
            return Err(BuildError::DuplicateMount {
                scope: self.scope.clone(),
                route: path.to_string(),
            });
        }

        self.router = mem::take(&mut self.router).route(path, method_router);
        self.routes.insert(path.to_string());
        Ok(self)
    }

    /// Paths merged in here are not checked against mounts, unlike `route`.
    /// axum panics on a conflict instead of returning a `BuildError`.
    pub fn merge(&mut self, router: Router<AppState>) -> &mut Self {
        self.router = mem::take(&mut self.router).merge(router);
        self
    }

    /// Escape hatch for layers and anything else `Router` offers.
    /// A fallback set here is replaced when the node is finished. Paths
    /// added here are not checked against mounts, unlike `route`.
    /// axum panics on a conflict instead of returning a `BuildError`.
    pub fn map_router<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(Router<AppState>) -> Router<AppState>,
    {
        self.router = f(mem::take(&mut self.router));
        self
    }

    /// Appends the fixed tail: not-found fallback, then validation
    /// normalisation, then the generic error handler as the outermost layer.
    pub fn finish(self) -> Router<AppState> {
        let handler: ErrorHandler = self.capabilities.middlewares.error_handler(&self.scope);

        self.router
            .fallback(tail::not_found)
            .layer(from_fn(tail::normalize_validation_errors))
            .layer(from_fn_with_state(handler, middlewares::handle_errors))
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn base_path(&self) -> &BasePath {
        &self.base_path
    }

    /// Name this node was mounted under, as given to `add_route`; empty on the root
    pub fn route_name(&self) -> &str {
        self.helpers.route_name()
    }

    pub fn helpers(&self) -> &RouteHelpers {
        &self.helpers
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn locals(&self) -> &Locals {
        &self.locals
    }

    pub fn capabilities(&self) -> &Arc<Capabilities> {
        &self.capabilities
    }

    pub fn kdf(&self) -> &Kdf {
        &self.capabilities.kdf
    }

    pub fn authentication(&self) -> &Authentication {
        &self.capabilities.authentication
    }

    pub fn middlewares(&self) -> &Middlewares {
        &self.capabilities.middlewares
    }

    pub fn expect(&self) -> &Expect {
        &self.capabilities.expect
    }

    pub fn tools(&self) -> &Tools {
        &self.capabilities.tools
    }
}
