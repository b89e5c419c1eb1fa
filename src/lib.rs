pub mod completion;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod prompt;
pub mod session;
pub mod sweeper;
pub mod templates_structs;
