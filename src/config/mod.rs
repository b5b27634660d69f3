// Start of file: /src/config/mod.rs

/*
* Re-export submodules related to configuration, environment variables,
* shared settings/locals and app state.
*/

pub mod environment;
pub mod locals;
pub mod settings;
pub mod state;

// End of file: /src/config/mod.rs
