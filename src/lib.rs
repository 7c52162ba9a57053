pub mod cli;
pub mod clock;
pub mod logging;
pub mod models;
pub mod query;
pub mod server;
pub mod store;
pub mod validate;
