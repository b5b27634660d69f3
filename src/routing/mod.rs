/*
    * Route tree builder.
    * Modules are looked up in a registry by logical path, built into child
    * nodes that carry the shared capabilities, finished with the
    * not-found / validation / error tail and nested on their parent.
*/

pub mod args;
pub mod base_path;
pub mod descriptor;
pub mod error;
pub mod helpers;
pub mod node;
pub mod registry;
pub mod tail;

pub use args::RouteArgs;
pub use base_path::BasePath;
pub use descriptor::RouteDescriptor;
pub use error::BuildError;
pub use helpers::RouteHelpers;
pub use node::RouteNode;
pub use registry::{ModuleRegistry, RegisterFn};
