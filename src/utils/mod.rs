// Start of file: /src/utils/mod.rs

/*
    * Error model, response envelope and global layer-error mapping.
*/

pub mod error_handler;
pub mod errors;
pub mod response_handler;

// End of file: /src/utils/mod.rs
