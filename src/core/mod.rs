// Logging setup and server assembly

pub mod logging;
pub mod server;
